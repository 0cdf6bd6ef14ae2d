//! Single-value flat text files (server URL, API key, system message).

use super::error::{StorageError, StorageResult};
use crate::text::{decode_text, trim};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file holding one raw text value, read and written whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the value with surrounding padding removed.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(&self) -> StorageResult<Option<String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(trim(&decode_text(bytes)).to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    /// Replace the file's contents, creating parent directories as needed.
    pub fn write(&self, value: &str) -> StorageResult<()> {
        write_whole(&self.path, value.as_bytes())?;
        debug!("Wrote {} bytes to {}", value.len(), self.path.display());
        Ok(())
    }
}

/// Write `contents` to `path` in one go, creating the parent directory first.
pub(crate) fn write_whole(path: &Path, contents: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| StorageError::io(path, e))
}
