//! Delivery sinks: where an exported document ends up.

use crate::error::{ExportError, ExportResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Receives a finished document under a suggested file name.
pub trait DeliverySink {
    fn save(&mut self, document: &str, file_name: &str) -> ExportResult<()>;
}

/// A document captured by `MemorySink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    pub document: String,
}

/// Keeps every delivered document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub saved: Vec<SavedDocument>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&SavedDocument> {
        self.saved.last()
    }
}

impl DeliverySink for MemorySink {
    fn save(&mut self, document: &str, file_name: &str) -> ExportResult<()> {
        self.saved.push(SavedDocument {
            file_name: file_name.to_string(),
            document: document.to_string(),
        });
        Ok(())
    }
}

/// Writes delivered documents into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent successful write.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

/// A bare file name: non-empty, no separators, not `.`/`..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

impl DeliverySink for FileSink {
    fn save(&mut self, document: &str, file_name: &str) -> ExportResult<()> {
        if !is_plain_file_name(file_name) {
            return Err(ExportError::InvalidFileName(file_name.to_string()));
        }
        let path = self.dir.join(file_name);
        fs::write(&path, document).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {} ({} bytes)", path.display(), document.len());
        self.last_written = Some(path);
        Ok(())
    }
}
