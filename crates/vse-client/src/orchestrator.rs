//! Two-phase workflow: transcribe videos, then write both script variations.

use tracing::{info, warn};
use vse_models::{ScriptMode, ScriptRequest, MIN_SCRIPT_CLIPS};

use crate::api::ApiClient;
use crate::state::FormState;

pub const MISSING_KEY: &str = "Please enter your Gemini API key first";
pub const MISSING_VIDEOS: &str = "Please upload at least one video file";
pub const TOO_FEW_CLIPS: &str = "Please provide at least 2 clip transcripts";
pub const MISSING_PRODUCT: &str = "Please provide a product link";

/// Drives a `FormState` through the backend calls.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    api: ApiClient,
}

impl Orchestrator {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Transcribe the selected videos and load the transcripts into the clip
    /// slots. Manual clip edits are overwritten on success and kept on failure.
    pub async fn process_videos(&self, state: FormState) -> FormState {
        if state.gemini_api_key.trim().is_empty() {
            return state.with_error(MISSING_KEY);
        }
        let videos = state.selected_videos();
        if videos.is_empty() {
            return state.with_error(MISSING_VIDEOS);
        }

        let state = state.start_video_processing();
        info!(count = videos.len(), "Processing videos");

        match self
            .api
            .process_videos(state.gemini_api_key.trim(), &videos)
            .await
        {
            Ok(transcripts) => {
                info!(count = transcripts.len(), "Transcripts received");
                state.finish_video_processing(transcripts)
            }
            Err(e) => {
                warn!(error = %e, "Video processing failed");
                state.fail_video_processing(format!("Error: {}", e.user_message()))
            }
        }
    }

    /// Request the STRICT and AI_OPTIMIZED variations concurrently. Neither
    /// call cancels the other; either both are shown or neither is.
    pub async fn generate_scripts(&self, state: FormState) -> FormState {
        let clips = state.filled_clips();
        if clips.len() < MIN_SCRIPT_CLIPS {
            return state.with_error(TOO_FEW_CLIPS);
        }
        if state.product_link.trim().is_empty() {
            return state.with_error(MISSING_PRODUCT);
        }

        let state = state.start_script_generation();
        let product_link = state.product_link.trim().to_string();

        let strict = ScriptRequest::new(clips.clone(), product_link.clone(), ScriptMode::Strict);
        let optimized = ScriptRequest::new(clips, product_link, ScriptMode::AiOptimized);

        // Both calls always run to completion; a failure only decides what is shown.
        let (strict_result, optimized_result) = tokio::join!(
            self.api.generate_script(&strict),
            self.api.generate_script(&optimized)
        );

        let pair = strict_result.and_then(|s| optimized_result.map(|o| (s, o)));
        match pair {
            Ok((strict, optimized)) => {
                info!("Both script variations generated");
                state.finish_script_generation(vec![strict, optimized])
            }
            Err(e) => {
                warn!(error = %e, "Script generation failed");
                state.fail_script_generation(format!("Error: {}", e.user_message()))
            }
        }
    }
}

/// Text of the selected variation, ready for the clipboard or a file.
pub fn copy_selected(state: &FormState) -> Option<String> {
    state.selected_script().map(|variation| variation.script.clone())
}
