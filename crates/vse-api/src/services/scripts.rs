//! Script generation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use vse_models::{ScriptRequest, ScriptVariation};
use vse_providers::{build_script_prompt, ProviderError, ScriptWriter};

use crate::error::{ApiError, ApiResult, SCRIPT_FAILURE};
use crate::metrics;

/// Turns clip transcripts into one script per request.
#[derive(Clone)]
pub struct ScriptService {
    writer: Option<Arc<dyn ScriptWriter>>,
}

impl ScriptService {
    /// `writer` is `None` when no server-side Anthropic key is configured;
    /// requests then fail upstream instead of at startup.
    pub fn new(writer: Option<Arc<dyn ScriptWriter>>) -> Self {
        Self { writer }
    }

    pub async fn generate(&self, request: &ScriptRequest) -> ApiResult<ScriptVariation> {
        request
            .check()
            .map_err(|e| ApiError::validation("Invalid script request", e.to_string()))?;

        let writer = self.writer.as_ref().ok_or_else(|| {
            ApiError::upstream(
                SCRIPT_FAILURE,
                ProviderError::config("ANTHROPIC_API_KEY not configured"),
            )
        })?;

        let clips = request.non_empty_clips();
        info!(
            mode = %request.mode,
            clips = clips.len(),
            "Generating script"
        );

        let prompt = build_script_prompt(&clips, request.product_link.trim(), request.mode);

        let start = Instant::now();
        let result = writer.complete(&prompt).await;
        metrics::record_upstream_call(
            "anthropic",
            "messages",
            result.is_ok(),
            start.elapsed().as_secs_f64(),
        );

        let script = result.map_err(|e| {
            warn!(mode = %request.mode, error = %e, "Script generation failed");
            ApiError::upstream(SCRIPT_FAILURE, e)
        })?;

        metrics::record_script_generated(request.mode.as_str());
        info!(mode = %request.mode, chars = script.len(), "Script generated");

        Ok(ScriptVariation {
            mode: request.mode,
            script,
        })
    }
}
