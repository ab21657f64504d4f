//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("AI analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("AI error: {0}")]
    Ai(#[from] lecta_ai::AiError),

    #[error("Store error: {0}")]
    Store(#[from] lecta_store::StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] lecta_storage::StorageError),

    #[error("Queue error: {0}")]
    Queue(#[from] lecta_queue::QueueError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }

    pub fn analysis_failed(msg: impl Into<String>) -> Self {
        Self::AnalysisFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Check if the error is transient and the job worth redelivering.
    ///
    /// Anything else is a permanent failure: the lecture is marked
    /// `failed` and the job moves to the DLQ.
    pub fn is_retryable(&self) -> bool {
        match self {
            WorkerError::Ai(e) => e.is_retryable(),
            WorkerError::Queue(_) => true,
            WorkerError::Store(lecta_store::StoreError::Database(_)) => true,
            _ => false,
        }
    }
}
