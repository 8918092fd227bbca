//! Axum HTTP API server.
//!
//! This crate provides:
//! - Multipart video upload and concurrent Gemini transcription
//! - Script generation through the Anthropic Messages API
//! - Per-IP rate limiting and security headers
//! - Prometheus metrics

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
pub use services::{ScriptService, TranscriptionService};
pub use state::AppState;
