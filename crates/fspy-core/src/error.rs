//! Error types for fspy-import-rs.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for fspy-import-rs operations.
#[derive(Error, Debug)]
pub enum FspyError {
    /// The project file is unparseable or structurally invalid.
    ///
    /// This aborts the import as a whole; no partial project is produced.
    #[error("invalid fSpy project file: {reason}")]
    Format { reason: String },

    /// A required field is absent from the project state.
    #[error("fSpy project state is missing required field '{0}'")]
    MissingField(&'static str),

    /// The reference image is absent or could not be written.
    ///
    /// Non-fatal: camera import proceeds, only image-plane creation is
    /// suppressed.
    #[error("no reference image available for '{}'", .0.display())]
    MissingImage(PathBuf),

    /// The host scene rejected a node-creation or attribute call.
    ///
    /// Aborts the remaining import steps.
    #[error("host scene error: {0}")]
    Scene(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FspyError {
    /// Builds a [`FspyError::Format`] from anything displayable.
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for fspy-import-rs operations.
pub type Result<T> = std::result::Result<T, FspyError>;
