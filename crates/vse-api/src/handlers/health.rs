//! Health check handler.

use axum::Json;
use vse_models::HealthResponse;

/// Health check endpoint (liveness probe). Touches no provider.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
