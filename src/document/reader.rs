use super::type_name;
use crate::{OverlayError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a JSON document whose top-level value must be an object
///
/// # Errors
///
/// Returns an error if:
/// - Unable to read the file
/// - The content is not valid JSON
/// - The top-level value is not an object
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path_ref = path.as_ref();

    let content = fs::read(path_ref)
        .map_err(|source| OverlayError::Read { path: path_ref.to_path_buf(), source })?;

    debug!("Read {} bytes from {}", content.len(), path_ref.display());

    parse_document(&content, path_ref)
}

/// Decode a JSON document from raw bytes. `path` is only used for error context.
///
/// # Errors
///
/// Returns an error if the content is not valid JSON or not a JSON object.
pub fn parse_document(content: &[u8], path: &Path) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(content)
        .map_err(|source| OverlayError::Parse { path: path.to_path_buf(), source })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(OverlayError::NotAnObject { path: path.to_path_buf(), found: type_name(&other) }),
    }
}
