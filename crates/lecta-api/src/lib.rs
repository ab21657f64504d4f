//! Axum HTTP API server.
//!
//! This crate provides:
//! - Lecture upload and status/notes endpoints
//! - Dashboard analytics endpoints
//! - Syllabus upload and coverage endpoints
//! - Rate limiting, security headers and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::SyllabusService;
pub use state::AppState;
