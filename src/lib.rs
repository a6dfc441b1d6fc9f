#![allow(missing_docs)]

pub mod app_config;
pub mod cli;
pub mod document;
pub mod merge;
pub mod profiling;

pub use document::{reader::read_document, writer::write_document};
pub use merge::{merge_documents, merge_objects};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Top-level value in {} must be a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Failed to serialize merged document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for document I/O.
pub type Result<T, E = OverlayError> = std::result::Result<T, E>;
