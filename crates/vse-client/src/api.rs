//! HTTP client for the script engine backend.

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use vse_models::{
    ErrorBody, GenerateScriptResponse, HealthResponse, ProcessVideosResponse, ScriptRequest,
    ScriptVariation, VideoAsset,
};

use crate::error::{ClientError, ClientResult};

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

const VIDEO_FALLBACK: &str = "Failed to process videos";
const SCRIPT_FALLBACK: &str = "Failed to generate script";

/// Backend API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        decode(response, "Health check failed").await
    }

    /// Upload videos for transcription. Transcripts come back in upload order.
    pub async fn process_videos(
        &self,
        api_key: &str,
        videos: &[VideoAsset],
    ) -> ClientResult<Vec<String>> {
        let mut form = Form::new();
        for video in videos {
            let part = Part::stream_with_length(Body::from(video.data.clone()), video.len() as u64)
                .file_name(video.filename.clone())
                .mime_str(&video.media_type)
                .map_err(|e| {
                    ClientError::Config(format!(
                        "Invalid media type '{}' for {}: {}",
                        video.media_type, video.filename, e
                    ))
                })?;
            form = form.part("videos", part);
        }
        form = form.text("geminiApiKey", api_key.to_string());

        debug!(count = videos.len(), "Uploading videos to backend");

        let response = self
            .client
            .post(self.url("/api/process-videos"))
            .multipart(form)
            .send()
            .await?;

        let body: ProcessVideosResponse = decode(response, VIDEO_FALLBACK).await?;
        Ok(body.transcripts)
    }

    pub async fn generate_script(&self, request: &ScriptRequest) -> ClientResult<ScriptVariation> {
        debug!(mode = %request.mode, "Requesting script");

        let response = self
            .client
            .post(self.url("/api/generate-scripts"))
            .json(request)
            .send()
            .await?;

        let body: GenerateScriptResponse = decode(response, SCRIPT_FALLBACK).await?;
        Ok(body.into())
    }
}

/// Decode a success body, or turn an error body into `ClientError::Api`.
async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map(|body| body.message().to_string())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    Err(ClientError::api(status.as_u16(), message))
}
