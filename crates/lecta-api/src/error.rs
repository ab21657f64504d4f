//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(#[from] lecta_store::StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] lecta_storage::StorageError),

    #[error("Queue error: {0}")]
    Queue(#[from] lecta_queue::QueueError),

    #[error("AI error: {0}")]
    Ai(#[from] lecta_ai::AiError),

    #[error("Syllabus error: {0}")]
    Syllabus(#[from] lecta_syllabus::SyllabusError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) | ApiError::Queue(lecta_queue::QueueError::DuplicateJob(_)) => {
                StatusCode::CONFLICT
            }
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Syllabus(lecta_syllabus::SyllabusError::UnsupportedFormat(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_)
            | ApiError::Store(_)
            | ApiError::Storage(_)
            | ApiError::Queue(_)
            | ApiError::Ai(_)
            | ApiError::Syllabus(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse { detail };
        (status, Json(body)).into_response()
    }
}
