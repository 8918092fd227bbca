//! API configuration.

use std::str::FromStr;
use std::time::Duration;

use vse_providers::anthropic::{
    DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_ANTHROPIC_VERSION,
    DEFAULT_MAX_TOKENS,
};
use vse_providers::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use vse_providers::{AnthropicConfig, GeminiConfig};

/// Default wait between upload and transcription.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(8);

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Inbound requests per second allowed per client IP
    pub rate_limit_rps: u32,
    /// Max request body size; uploaded videos are buffered in memory
    pub max_body_size: usize,
    /// Fixed wait after each upload before asking for a transcript
    pub processing_delay: Duration,
    /// Gemini endpoint (the key comes from each request)
    pub gemini: GeminiConfig,
    /// Anthropic endpoint; `None` when no server-side key is configured
    pub anthropic: Option<AnthropicConfig>,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 200 * 1024 * 1024, // 200MB
            processing_delay: DEFAULT_PROCESSING_DELAY,
            gemini: GeminiConfig::default(),
            anthropic: None,
            metrics_enabled: true,
            environment: "development".to_string(),
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let upstream_timeout = env_parse::<u64>("UPSTREAM_TIMEOUT_SECS").map(Duration::from_secs);

        let gemini = GeminiConfig {
            base_url: env_string("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            model: env_string("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            timeout: upstream_timeout,
        };

        let anthropic = env_string("ANTHROPIC_API_KEY").map(|api_key| AnthropicConfig {
            base_url: env_string("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            api_key,
            model: env_string("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            max_tokens: env_parse("ANTHROPIC_MAX_TOKENS").unwrap_or(DEFAULT_MAX_TOKENS),
            api_version: env_string("ANTHROPIC_VERSION")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_VERSION.to_string()),
            timeout: upstream_timeout,
        });

        Self {
            host: env_string("API_HOST").unwrap_or(defaults.host),
            port: env_parse("PORT")
                .or_else(|| env_parse("API_PORT"))
                .unwrap_or(defaults.port),
            cors_origins: env_string("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS").unwrap_or(defaults.rate_limit_rps),
            max_body_size: env_parse("MAX_BODY_SIZE").unwrap_or(defaults.max_body_size),
            processing_delay: env_parse::<u64>("VIDEO_PROCESSING_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.processing_delay),
            gemini,
            anthropic,
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
            environment: env_string("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
