//! Application state.

use std::sync::Arc;

use tracing::{info, warn};
use vse_providers::{
    AnthropicClient, GeminiClient, MediaTranscriber, ProviderResult, ScriptWriter,
};

use crate::config::ApiConfig;
use crate::services::{ScriptService, TranscriptionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub transcription: TranscriptionService,
    pub scripts: ScriptService,
}

impl AppState {
    /// Build state with the real provider clients.
    pub fn new(config: ApiConfig) -> ProviderResult<Self> {
        let transcriber: Arc<dyn MediaTranscriber> =
            Arc::new(GeminiClient::new(config.gemini.clone())?);

        let writer: Option<Arc<dyn ScriptWriter>> = match &config.anthropic {
            Some(anthropic) => {
                let client = AnthropicClient::new(anthropic.clone())?;
                info!(model = client.model(), "Anthropic script writer configured");
                Some(Arc::new(client))
            }
            None => {
                warn!("ANTHROPIC_API_KEY not set; script generation requests will fail");
                None
            }
        };

        Ok(Self::with_providers(config, transcriber, writer))
    }

    /// Build state around caller-supplied providers.
    pub fn with_providers(
        config: ApiConfig,
        transcriber: Arc<dyn MediaTranscriber>,
        writer: Option<Arc<dyn ScriptWriter>>,
    ) -> Self {
        Self {
            transcription: TranscriptionService::new(transcriber, config.processing_delay),
            scripts: ScriptService::new(writer),
            config,
        }
    }
}
