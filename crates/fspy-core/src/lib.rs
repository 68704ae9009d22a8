//! Core abstractions for fspy-import-rs.
//!
//! This crate provides the fundamental traits and types used throughout
//! fspy-import-rs:
//! - [`SceneBackend`] trait, the narrow host scene capability surface
//! - Camera parameter types ([`CameraPose`], [`CameraIntrinsics`])
//! - Coordinate-convention conversion ([`Conventions`], [`convert_pose`])
//! - Error types and import options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod convert;
pub mod error;
pub mod options;
pub mod scene;

pub use camera::{CameraIntrinsics, CameraPose, DEFAULT_SENSOR_WIDTH_MM, MM_TO_INCH};
pub use convert::{basis_change, convert_pose, rotation_to_euler_degrees, Conventions, UpAxis};
pub use error::{FspyError, Result};
pub use options::ImportOptions;
pub use scene::{CameraNodes, FilmFit, NodeId, SceneBackend};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Vec2, Vec3};
