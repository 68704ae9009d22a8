//! Import configuration.

use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::convert::UpAxis;

/// User-supplied values for a single import invocation.
///
/// Nothing here persists past one run; the defaults reproduce a plain
/// "Import Camera" with no re-orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Name for the camera transform node.
    pub camera_name: String,

    /// Name for the group the camera is parented under.
    pub group_name: String,

    /// Where to write the embedded reference image. `None` suppresses
    /// image-plane creation; the camera is still imported.
    pub image_path: Option<PathBuf>,

    /// Re-orients the camera group for this up axis after import.
    pub up_axis: Option<UpAxis>,

    /// Additional rotation applied to the group, XYZ degrees.
    pub rotation_offset_degrees: Vec3,

    /// Lock the camera's translation channels once placed.
    pub lock_camera: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            camera_name: "fspy_camera".to_string(),
            group_name: "fspy_camera_group".to_string(),
            image_path: None,
            up_axis: None,
            rotation_offset_degrees: Vec3::ZERO,
            lock_camera: true,
        }
    }
}

impl ImportOptions {
    /// Creates options with default node names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference-image destination.
    #[must_use]
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Sets the up-axis re-orientation for the camera group.
    #[must_use]
    pub fn with_up_axis(mut self, up_axis: UpAxis) -> Self {
        self.up_axis = Some(up_axis);
        self
    }

    /// Sets the group rotation offset in degrees.
    #[must_use]
    pub fn with_rotation_offset(mut self, degrees: Vec3) -> Self {
        self.rotation_offset_degrees = degrees;
        self
    }
}
