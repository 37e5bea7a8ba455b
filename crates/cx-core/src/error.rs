//! Error types for export delivery.
//!
//! Building a document never fails; only handing it to a sink can.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while delivering an exported document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The suggested file name is empty or would escape the target directory.
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Writing the document failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
