use crate::{OverlayError, Result};
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize a document as JSON indented by two spaces
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn render_document(document: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write a document to a JSON file
///
/// The content goes to a temporary file in the destination directory first and
/// is then renamed over `path`, so readers never observe a half-written file.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create parent directories
/// - Unable to serialize the document
/// - Unable to write or persist the file
pub fn write_document<P: AsRef<Path>>(path: P, document: &Value) -> Result<()> {
    let path_ref = path.as_ref();
    let json = render_document(document)?;
    let write_err = |source: std::io::Error| OverlayError::Write { path: path_ref.to_path_buf(), source };

    let parent = match path_ref.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    set_output_permissions(&file, path_ref).map_err(write_err)?;
    file.persist(path_ref).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", json.len(), path_ref.display());
    Ok(())
}

/// Temp files are created owner-only; keep the destination's mode, or 0644 for a new file.
fn set_output_permissions(file: &NamedTempFile, path: &Path) -> std::io::Result<()> {
    if let Ok(existing) = fs::metadata(path) {
        return file.as_file().set_permissions(existing.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}

/// Create a backup of a file with timestamp
///
/// Returns the backup path, or `None` when there is nothing to back up.
///
/// # Errors
///
/// Returns an error if unable to copy the file
pub fn backup_file<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path_ref.with_file_name(format!(
        "{}.backup.{}",
        path_ref.file_name().and_then(|n| n.to_str()).unwrap_or("document.json"),
        timestamp
    ));

    fs::copy(path_ref, &backup_path)
        .map_err(|source| OverlayError::Write { path: backup_path.clone(), source })?;

    Ok(Some(backup_path))
}
