//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("No result found")]
    NoResult,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub fn invalid_filename(msg: impl Into<String>) -> Self {
        Self::InvalidFilename(msg.into())
    }
}
