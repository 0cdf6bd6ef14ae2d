//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the flat-file stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or rewriting a backing file failed.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be written without corrupting the line format.
    #[error("Invalid access point record: {0}")]
    InvalidRecord(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
