//! Provider error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Shape shared by Gemini and Anthropic error bodies: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: Option<String>,
}

impl ProviderError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an upstream error from a non-success response body, preferring
    /// the provider's own `error.message`.
    pub fn from_upstream(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Self::Upstream { status, message }
    }

    /// Message reported to API callers.
    pub fn details(&self) -> String {
        match self {
            ProviderError::Upstream { message, .. } | ProviderError::Config(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // The Gemini key travels in the query string.
        let e = e.without_url();
        if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_extracted() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = ProviderError::from_upstream(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err.details(),
            "API key not valid. Please pass a valid API key."
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_anthropic_error_shape() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = ProviderError::from_upstream(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(err.details(), "Overloaded");
    }

    #[test]
    fn test_raw_body_fallback() {
        let err = ProviderError::from_upstream(StatusCode::BAD_GATEWAY, "upstream exploded\n");
        assert_eq!(err.details(), "upstream exploded");
    }

    #[test]
    fn test_status_reason_fallback() {
        let err = ProviderError::from_upstream(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(err.details(), "Too Many Requests");
    }

    #[test]
    fn test_non_upstream_details() {
        let err = ProviderError::malformed("No candidates in Gemini response");
        assert_eq!(
            err.details(),
            "Malformed response: No candidates in Gemini response"
        );
        assert_eq!(err.status(), None);
    }
}
