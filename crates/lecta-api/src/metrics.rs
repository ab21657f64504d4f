//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use regex::Regex;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "lecta_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "lecta_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "lecta_http_requests_in_flight";

    // Queue metrics
    pub const QUEUE_LENGTH: &str = "lecta_queue_length";
    pub const JOBS_ENQUEUED_TOTAL: &str = "lecta_jobs_enqueued_total";

    // Pipeline metrics
    pub const LECTURES_UPLOADED_TOTAL: &str = "lecta_lectures_uploaded_total";
    pub const SYLLABI_PROCESSED_TOTAL: &str = "lecta_syllabi_processed_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "lecta_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Update queue length gauge.
pub fn set_queue_length(length: u64) {
    gauge!(names::QUEUE_LENGTH).set(length as f64);
}

/// Record job enqueued.
pub fn record_job_enqueued(job_type: &str) {
    let labels = [("type", job_type.to_string())];
    counter!(names::JOBS_ENQUEUED_TOTAL, &labels).increment(1);
}

/// Record a lecture upload accepted.
pub fn record_lecture_uploaded() {
    counter!(names::LECTURES_UPLOADED_TOTAL).increment(1);
}

/// Record a syllabus processed end to end.
pub fn record_syllabus_processed() {
    counter!(names::SYLLABI_PROCESSED_TOTAL).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

static NUMERIC_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9]+(/|$)").expect("valid regex"));

/// Sanitize path for metrics labels (collapse row ids).
fn sanitize_path(path: &str) -> String {
    NUMERIC_ID_RE.replace_all(path, "/:id$1").to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/lecture/12"), "/lecture/:id");
        assert_eq!(sanitize_path("/lecture/12/notes"), "/lecture/:id/notes");
        assert_eq!(sanitize_path("/analytics/dashboard"), "/analytics/dashboard");
    }
}
