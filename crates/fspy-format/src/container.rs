//! The fSpy binary container.
//!
//! An `.fspy` file is a small envelope around a JSON state blob and the
//! project's reference image:
//!
//! ```text
//! bytes 0..4    magic b"fspy"
//! bytes 4..8    format version, u32 little-endian (currently 1)
//! bytes 8..12   state blob size in bytes, u32 little-endian
//! bytes 12..16  image payload size in bytes, u32 little-endian
//! then          state blob (JSON, may carry NUL padding)
//! then          image payload (PNG/JPEG bytes, may be empty)
//! ```

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use fspy_core::{FspyError, Result};

use crate::state::StateData;

/// File magic at the start of every fSpy project.
pub const MAGIC: &[u8; 4] = b"fspy";

/// The container version this interpreter understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// A decoded fSpy container: the parsed state plus the raw embedded image.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    /// Container format version.
    pub version: u32,
    /// The parsed project state.
    pub state: StateData,
    /// Embedded reference image bytes; empty when the project was saved
    /// without one.
    pub image_data: Vec<u8>,
}

impl ProjectFile {
    /// Reads and decodes a project file from disk.
    ///
    /// An unreadable path is a format error, like any other malformed
    /// input: the file the user pointed at is not a usable fSpy project.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::trace!("opening fSpy file {}", path.display());
        let bytes = fs::read(path).map_err(|e| {
            FspyError::format(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Decodes a project file from in-memory bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|_| FspyError::format("file too short for header"))?;
        if &magic != MAGIC {
            return Err(FspyError::format(format!(
                "bad magic {magic:?}, not an fSpy project"
            )));
        }

        let version = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| FspyError::format("file too short for header"))?;
        if version != SUPPORTED_VERSION {
            return Err(FspyError::format(format!(
                "unsupported container version {version} (expected {SUPPORTED_VERSION})"
            )));
        }

        let state_size = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| FspyError::format("file too short for header"))?
            as usize;
        let image_size = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| FspyError::format("file too short for header"))?
            as usize;
        log::trace!("container v{version}, state {state_size} bytes, image {image_size} bytes");

        let mut state_bytes = vec![0u8; state_size];
        cursor.read_exact(&mut state_bytes).map_err(|_| {
            FspyError::format(format!("state blob truncated (declared {state_size} bytes)"))
        })?;
        // fSpy pads the state blob with NULs; strip them before decoding.
        state_bytes.retain(|&b| b != 0);
        let state_text = std::str::from_utf8(&state_bytes)
            .map_err(|e| FspyError::format(format!("state blob is not UTF-8: {e}")))?;
        let state: StateData = serde_json::from_str(state_text)
            .map_err(|e| FspyError::format(format!("state blob is not valid JSON: {e}")))?;

        let mut image_data = vec![0u8; image_size];
        cursor.read_exact(&mut image_data).map_err(|_| {
            FspyError::format(format!(
                "image payload truncated (declared {image_size} bytes)"
            ))
        })?;

        Ok(Self {
            version,
            state,
            image_data,
        })
    }

    /// Whether the project carries an embedded reference image.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_data.is_empty()
    }
}
