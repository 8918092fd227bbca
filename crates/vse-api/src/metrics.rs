//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vse_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vse_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vse_http_requests_in_flight";

    // Provider metrics
    pub const UPSTREAM_CALLS_TOTAL: &str = "vse_upstream_calls_total";
    pub const UPSTREAM_CALL_DURATION_SECONDS: &str = "vse_upstream_call_duration_seconds";

    // Domain metrics
    pub const VIDEOS_TRANSCRIBED_TOTAL: &str = "vse_videos_transcribed_total";
    pub const VIDEO_BATCHES_FAILED_TOTAL: &str = "vse_video_batches_failed_total";
    pub const SCRIPTS_GENERATED_TOTAL: &str = "vse_scripts_generated_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "vse_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path).to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one call to an external provider.
pub fn record_upstream_call(provider: &str, operation: &str, success: bool, duration_secs: f64) {
    let labels = [
        ("provider", provider.to_string()),
        ("operation", operation.to_string()),
        ("outcome", if success { "ok" } else { "error" }.to_string()),
    ];

    counter!(names::UPSTREAM_CALLS_TOTAL, &labels).increment(1);
    histogram!(names::UPSTREAM_CALL_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a successful transcription batch.
pub fn record_videos_transcribed(count: usize) {
    counter!(names::VIDEOS_TRANSCRIBED_TOTAL).increment(count as u64);
}

/// Record a transcription batch that failed upstream.
pub fn record_video_batch_failed() {
    counter!(names::VIDEO_BATCHES_FAILED_TOTAL).increment(1);
}

/// Record a generated script.
pub fn record_script_generated(mode: &str) {
    let labels = [("mode", mode.to_string())];
    counter!(names::SCRIPTS_GENERATED_TOTAL, &labels).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", sanitize_path(endpoint).to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Collapse unknown paths so scanners can't blow up label cardinality.
fn sanitize_path(path: &str) -> &'static str {
    match path {
        "/api/process-videos" => "/api/process-videos",
        "/api/generate-scripts" => "/api/generate-scripts",
        "/api/health" => "/api/health",
        "/health" => "/health",
        "/metrics" => "/metrics",
        _ => "other",
    }
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
        assert_eq!(sanitize_path("/api/process-videos"), "/api/process-videos");
        assert_eq!(sanitize_path("/wp-admin/login.php"), "other");
        assert_eq!(sanitize_path("/api/generate-scripts/"), "other");
    }
}
