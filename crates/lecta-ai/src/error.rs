//! AI client error types.

use thiserror::Error;

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("Could not extract JSON from model output: {0}")]
    MalformedJson(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the failure is worth retrying (transport error or a
    /// transient status from the provider).
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            AiError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
