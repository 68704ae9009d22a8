//! Camera pose and lens parameter types.

use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{FspyError, Result};

/// Millimeters to inches, the factor host film-back attributes expect.
pub const MM_TO_INCH: f32 = 0.039_370_1;

/// Horizontal film gate of a 35mm still frame, in millimeters.
///
/// fSpy expresses its solution as a field of view; the focal length handed
/// to the host is derived against this gate.
pub const DEFAULT_SENSOR_WIDTH_MM: f32 = 36.0;

/// A camera's world-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// World-from-camera rotation.
    pub rotation: Mat3,
}

impl CameraPose {
    /// Creates a pose from position and rotation.
    #[must_use]
    pub fn new(position: Vec3, rotation: Mat3) -> Self {
        Self { position, rotation }
    }

    /// The identity pose: origin position, no rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
        }
    }

    /// Checks that the rotation is orthonormal with determinant +1, within
    /// `tolerance` per matrix entry.
    #[must_use]
    pub fn is_valid_rotation(&self, tolerance: f32) -> bool {
        let r = self.rotation;
        let gram = r.transpose() * r;
        let mut max_err: f32 = (gram.determinant() - 1.0).abs();
        let identity = Mat3::IDENTITY;
        for col in 0..3 {
            let diff = gram.col(col) - identity.col(col);
            max_err = max_err.max(diff.abs().max_element());
        }
        max_err < tolerance && r.determinant() > 0.0
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Camera lens and sensor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in millimeters, against [`CameraIntrinsics::sensor_width_mm`].
    pub focal_length_mm: f32,
    /// Horizontal film gate in millimeters.
    pub sensor_width_mm: f32,
    /// Reference image width in pixels.
    pub image_width: u32,
    /// Reference image height in pixels.
    pub image_height: u32,
    /// Principal point as a normalized film-back offset, if the calibration
    /// solved for one.
    pub principal_point: Option<Vec2>,
}

impl CameraIntrinsics {
    /// Derives intrinsics from a solved horizontal field of view in radians.
    ///
    /// Fails with a format error on non-positive image dimensions or an FoV
    /// outside (0, pi).
    pub fn from_horizontal_fov(
        fov_radians: f32,
        image_width: u32,
        image_height: u32,
        principal_point: Option<Vec2>,
    ) -> Result<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(FspyError::format(format!(
                "image dimensions must be positive, got {image_width}x{image_height}"
            )));
        }
        if !fov_radians.is_finite() || fov_radians <= 0.0 || fov_radians >= std::f32::consts::PI {
            return Err(FspyError::format(format!(
                "horizontal field of view out of range: {fov_radians} rad"
            )));
        }
        let focal_length_mm = (DEFAULT_SENSOR_WIDTH_MM / 2.0) / (fov_radians / 2.0).tan();
        Ok(Self {
            focal_length_mm,
            sensor_width_mm: DEFAULT_SENSOR_WIDTH_MM,
            image_width,
            image_height,
            principal_point,
        })
    }

    /// Image aspect ratio (width / height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Vertical film gate in millimeters, from the horizontal gate and the
    /// image aspect.
    #[must_use]
    pub fn sensor_height_mm(&self) -> f32 {
        self.sensor_width_mm / self.aspect_ratio()
    }

    /// Horizontal field of view in radians.
    #[must_use]
    pub fn horizontal_fov(&self) -> f32 {
        2.0 * (self.sensor_width_mm / (2.0 * self.focal_length_mm)).atan()
    }

    /// Film aperture as (horizontal, vertical) in inches, the unit host
    /// camera shapes take.
    #[must_use]
    pub fn film_aperture_inches(&self) -> Vec2 {
        Vec2::new(
            self.sensor_width_mm * MM_TO_INCH,
            self.sensor_height_mm() * MM_TO_INCH,
        )
    }

    /// Film-back offset in inches derived from the principal point, zero
    /// when none was solved.
    #[must_use]
    pub fn film_offset_inches(&self) -> Vec2 {
        match self.principal_point {
            Some(pp) => Vec2::new(
                pp.x * self.sensor_width_mm * MM_TO_INCH,
                pp.y * self.sensor_height_mm() * MM_TO_INCH,
            ),
            None => Vec2::ZERO,
        }
    }
}
