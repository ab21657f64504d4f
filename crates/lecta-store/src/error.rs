//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Lecture not found: {0}")]
    LectureNotFound(i64),

    #[error("Invalid stored timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid stored status: {0}")]
    InvalidStatus(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn lecture_not_found(id: impl Into<i64>) -> Self {
        Self::LectureNotFound(id.into())
    }
}
