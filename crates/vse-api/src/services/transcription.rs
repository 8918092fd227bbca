//! Video transcription pipeline.
//!
//! Each video is uploaded, left to process for a fixed delay, then
//! transcribed. All videos of a batch run concurrently; the batch fails as a
//! whole on the first error and results come back in upload order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use tracing::{info, warn};
use vse_models::{VideoAsset, MAX_VIDEOS};
use vse_providers::{MediaTranscriber, ProviderResult};

use crate::error::{ApiError, ApiResult, VIDEO_FAILURE};
use crate::metrics;

/// Runs the upload → wait → transcribe pipeline for a batch of videos.
#[derive(Clone)]
pub struct TranscriptionService {
    transcriber: Arc<dyn MediaTranscriber>,
    processing_delay: Duration,
}

impl TranscriptionService {
    pub fn new(transcriber: Arc<dyn MediaTranscriber>, processing_delay: Duration) -> Self {
        Self {
            transcriber,
            processing_delay,
        }
    }

    /// Transcribe every video with the caller's key.
    ///
    /// Inputs are validated before any provider call. The returned list is
    /// index-aligned with `videos`.
    pub async fn transcribe_all(
        &self,
        api_key: &str,
        videos: &[VideoAsset],
    ) -> ApiResult<Vec<String>> {
        if api_key.trim().is_empty() {
            return Err(ApiError::bad_request("Gemini API key required"));
        }
        if videos.is_empty() {
            return Err(ApiError::bad_request("At least one video file is required"));
        }
        if videos.len() > MAX_VIDEOS {
            return Err(ApiError::bad_request(format!(
                "At most {} videos may be uploaded",
                MAX_VIDEOS
            )));
        }

        info!("Processing {} videos...", videos.len());

        let pipelines = videos
            .iter()
            .enumerate()
            .map(|(i, video)| self.transcribe_one(api_key.trim(), i + 1, video));

        match try_join_all(pipelines).await {
            Ok(transcripts) => {
                metrics::record_videos_transcribed(transcripts.len());
                Ok(transcripts)
            }
            Err(e) => {
                metrics::record_video_batch_failed();
                Err(ApiError::upstream(VIDEO_FAILURE, e))
            }
        }
    }

    async fn transcribe_one(
        &self,
        api_key: &str,
        index: usize,
        video: &VideoAsset,
    ) -> ProviderResult<String> {
        info!(
            video_index = index,
            filename = %video.filename,
            bytes = video.len(),
            "Uploading video"
        );

        let start = Instant::now();
        let uploaded = self.transcriber.upload_file(api_key, video).await;
        metrics::record_upstream_call(
            "gemini",
            "upload",
            uploaded.is_ok(),
            start.elapsed().as_secs_f64(),
        );
        let uploaded = uploaded.inspect_err(|e| {
            warn!(
                video_index = index,
                filename = %video.filename,
                error = %e,
                "Video upload failed"
            );
        })?;

        info!(
            video_index = index,
            file_name = %uploaded.name,
            uri = %uploaded.uri,
            "File uploaded"
        );

        // Blind wait; the provider's file state is not polled.
        if !self.processing_delay.is_zero() {
            info!(
                video_index = index,
                delay_secs = self.processing_delay.as_secs_f64(),
                "Waiting for video processing"
            );
            tokio::time::sleep(self.processing_delay).await;
        }

        let start = Instant::now();
        let transcript = self
            .transcriber
            .generate_transcript(api_key, &uploaded)
            .await;
        metrics::record_upstream_call(
            "gemini",
            "generate",
            transcript.is_ok(),
            start.elapsed().as_secs_f64(),
        );
        let transcript = transcript.inspect_err(|e| {
            warn!(
                video_index = index,
                filename = %video.filename,
                error = %e,
                "Transcript generation failed"
            );
        })?;

        info!(video_index = index, "Video processed successfully");
        Ok(transcript)
    }
}
