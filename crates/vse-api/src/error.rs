//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use vse_models::ErrorBody;
use vse_providers::ProviderError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Headline used when a video batch fails upstream.
pub const VIDEO_FAILURE: &str = "Failed to process videos";
/// Headline used when a script call fails upstream.
pub const SCRIPT_FAILURE: &str = "Failed to generate script";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{context}: {details}")]
    Validation {
        context: &'static str,
        details: String,
    },

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Rate limited")]
    RateLimited,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(context: &'static str, details: impl Into<String>) -> Self {
        Self::Validation {
            context,
            details: details.into(),
        }
    }

    pub fn upstream(context: &'static str, source: ProviderError) -> Self {
        Self::Upstream { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the caller.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::BadRequest(msg) => ErrorBody::new(msg.clone()),
            ApiError::Validation { context, details } => {
                ErrorBody::with_details(*context, details.clone())
            }
            ApiError::Upstream { context, source } => {
                ErrorBody::with_details(*context, source.details())
            }
            ApiError::PayloadTooLarge => ErrorBody::new("Request body too large"),
            ApiError::RateLimited => {
                ErrorBody::new("Rate limit exceeded. Please try again later.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.body();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(body)).into_response();
        if matches!(self, ApiError::RateLimited) {
            response
                .headers_mut()
                .insert("Retry-After", axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as HttpStatus;

    #[test]
    fn test_bad_request_body() {
        let err = ApiError::bad_request("Gemini API key required");
        assert_eq!(err.status_code(), HttpStatus::BAD_REQUEST);
        assert_eq!(err.body(), ErrorBody::new("Gemini API key required"));
    }

    #[test]
    fn test_upstream_body_carries_provider_message() {
        let source = ProviderError::from_upstream(
            HttpStatus::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"Resource has been exhausted"}}"#,
        );
        let err = ApiError::upstream(VIDEO_FAILURE, source);
        assert_eq!(err.status_code(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            ErrorBody::with_details("Failed to process videos", "Resource has been exhausted")
        );
    }

    #[test]
    fn test_validation_body() {
        let err = ApiError::validation("Invalid script request", "A product link is required");
        assert_eq!(err.status_code(), HttpStatus::BAD_REQUEST);
        assert_eq!(err.body().message(), "A product link is required");
    }

    #[test]
    fn test_payload_too_large_body() {
        let err = ApiError::PayloadTooLarge;
        assert_eq!(err.status_code(), HttpStatus::PAYLOAD_TOO_LARGE);
        assert_eq!(err.body(), ErrorBody::new("Request body too large"));
    }
}
