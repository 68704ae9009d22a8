//! fSpy project-file interpreter.
//!
//! Decodes `.fspy` project files into a [`CalibrationProject`]: the binary
//! container envelope, the JSON state blob inside it, and the derivation of
//! host-ready camera parameters (pose, focal length, film back, principal
//! point). Either a file decodes completely or the whole operation fails;
//! nothing partial escapes.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// The serde model mirrors fSpy's field names, casts to f32 are deliberate
#![allow(clippy::cast_possible_truncation)]

pub mod container;
pub mod project;
pub mod state;

#[cfg(test)]
mod test_bytes;

pub use container::{ProjectFile, MAGIC, SUPPORTED_VERSION};
pub use project::CalibrationProject;
pub use state::{
    CalibrationSettingsData, CameraParametersData, PrincipalPointData, ReferenceDistanceUnit,
    StateData, TransformData,
};
