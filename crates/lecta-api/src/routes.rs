//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::analytics::{
    get_dashboard_metrics, get_questions_per_class, get_summary_metrics, get_syllabus_coverage,
    get_topics_overview,
};
use crate::handlers::lectures::{get_lecture_notes, get_lecture_status, root, upload_lecture};
use crate::handlers::syllabus::{
    get_latest_syllabus_result, get_syllabus_topics, upload_syllabus,
};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let lecture_routes = Router::new()
        .route("/", get(root))
        .route("/upload/", post(upload_lecture))
        .route("/lecture/:lecture_id", get(get_lecture_status))
        .route("/lecture/:lecture_id/notes", get(get_lecture_notes));

    let analytics_routes = Router::new()
        .route("/analytics/questions", get(get_questions_per_class))
        .route("/analytics/topics", get(get_topics_overview))
        .route("/analytics/summary", get(get_summary_metrics))
        .route("/analytics/syllabus", get(get_syllabus_coverage))
        .route("/analytics/dashboard", get(get_dashboard_metrics));

    let syllabus_routes = Router::new()
        .route("/upload_syllabus/", post(upload_syllabus))
        .route("/syllabus_result/", get(get_latest_syllabus_result))
        .route("/syllabus/topics", get(get_syllabus_topics));

    // Per-IP rate limiting on everything except probes
    let rate_limiter = std::sync::Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(lecture_routes)
        .merge(analytics_routes)
        .merge(syllabus_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Uploads are large; lift axum's default limit and enforce our own
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
