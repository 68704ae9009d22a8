//! The host scene capability trait.
//!
//! Everything the importer needs from a host application is behind
//! [`SceneBackend`], so the interpreter and conversion logic run and test
//! without a live host. A real integration implements this against the
//! host's node and attribute API; the facade crate ships a recording
//! implementation for headless runs.

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::error::Result;

/// Opaque handle to a node created in the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// The transform and shape nodes making up a host camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraNodes {
    /// The transform node carrying translation and rotation.
    pub transform: NodeId,
    /// The shape node carrying lens attributes.
    pub shape: NodeId,
}

/// How the host fits the film gate to the render resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmFit {
    Fill,
    /// Fit the horizontal gate; what a horizontally solved FoV wants.
    #[default]
    Horizontal,
    Vertical,
    Overscan,
}

/// Scene-construction operations consumed by the importer.
///
/// Every method is fallible: hosts reject invalid node names, duplicate
/// nodes, or locked attributes, and those rejections surface as
/// [`FspyError::Scene`](crate::FspyError::Scene) and abort the remaining
/// import steps.
pub trait SceneBackend {
    /// Creates an empty transform group.
    fn create_group(&mut self, name: &str) -> Result<NodeId>;

    /// Creates a camera parented under `parent`.
    fn create_camera(&mut self, name: &str, parent: NodeId) -> Result<CameraNodes>;

    /// Sets a node's translation in scene units.
    fn set_translation(&mut self, node: NodeId, translation: Vec3) -> Result<()>;

    /// Sets a node's rotation as XYZ Euler angles in degrees.
    fn set_rotation_degrees(&mut self, node: NodeId, degrees: Vec3) -> Result<()>;

    /// Sets a camera shape's focal length in millimeters.
    fn set_focal_length(&mut self, shape: NodeId, focal_length_mm: f32) -> Result<()>;

    /// Sets a camera shape's film aperture, (horizontal, vertical) inches.
    fn set_film_aperture_inches(&mut self, shape: NodeId, aperture: Vec2) -> Result<()>;

    /// Sets a camera shape's film-back offset in inches.
    fn set_film_offset_inches(&mut self, shape: NodeId, offset: Vec2) -> Result<()>;

    /// Sets a camera shape's film fit mode.
    fn set_film_fit(&mut self, shape: NodeId, fit: FilmFit) -> Result<()>;

    /// Locks a node's translation channels against accidental edits.
    fn lock_translation(&mut self, node: NodeId) -> Result<()>;

    /// Creates an image plane attached to `camera`, showing the file at
    /// `path`.
    fn create_image_plane(&mut self, camera: CameraNodes, path: &Path) -> Result<NodeId>;
}
