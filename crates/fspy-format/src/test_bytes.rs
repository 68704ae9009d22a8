//! Helpers for building raw container bytes in tests.

/// Assembles a well-formed container around the given state text and image
/// payload.
pub(crate) fn container_bytes(state: &str, image: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"fspy");
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&(u32::try_from(state.len()).unwrap()).to_le_bytes());
    bytes.extend_from_slice(&(u32::try_from(image.len()).unwrap()).to_le_bytes());
    bytes.extend_from_slice(state.as_bytes());
    bytes.extend_from_slice(image);
    bytes
}
