//! Gemini client for video upload and transcription.
//!
//! Videos go through the Files API first; the returned file URI is then
//! referenced from a `generateContent` call. The API key is the caller's own
//! and is passed per call, never stored on the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vse_models::VideoAsset;

use crate::error::{ProviderError, ProviderResult};
use crate::prompts::TRANSCRIPT_INSTRUCTION;
use crate::traits::MediaTranscriber;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini endpoint configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Scheme + host, without a trailing slash
    pub base_url: String,
    /// Model used for transcription
    pub model: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: None,
        }
    }
}

/// A file stored by the Files API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub uri: String,
    pub name: String,
    pub mime_type: String,
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: Option<FileResource>,
}

#[derive(Debug, Deserialize)]
struct FileResource {
    uri: String,
    name: String,
}

/// generateContent request.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

/// generateContent response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> ProviderResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/upload/v1beta/files",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn check(response: Response) -> ProviderResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Gemini API returned an error");
        Err(ProviderError::from_upstream(status, &body))
    }
}

#[async_trait]
impl MediaTranscriber for GeminiClient {
    async fn upload_file(&self, api_key: &str, asset: &VideoAsset) -> ProviderResult<UploadedFile> {
        let part = Part::stream_with_length(Body::from(asset.data.clone()), asset.len() as u64)
            .file_name(asset.filename.clone())
            .mime_str(&asset.media_type)
            .map_err(|e| {
                ProviderError::InvalidRequest(format!(
                    "Invalid media type '{}': {}",
                    asset.media_type,
                    e.without_url()
                ))
            })?;
        let form = Form::new().part("file", part);

        debug!(filename = %asset.filename, bytes = asset.len(), "Uploading file to Gemini");

        let response = self
            .client
            .post(self.upload_url())
            .query(&[("key", api_key)])
            .multipart(form)
            .send()
            .await?;

        let upload: UploadResponse = Self::check(response).await?.json().await?;
        let file = upload
            .file
            .ok_or_else(|| ProviderError::malformed("No file in Gemini upload response"))?;

        Ok(UploadedFile {
            uri: file.uri,
            name: file.name,
            mime_type: asset.media_type.clone(),
        })
    }

    async fn generate_transcript(
        &self,
        api_key: &str,
        file: &UploadedFile,
    ) -> ProviderResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: TRANSCRIPT_INSTRUCTION.to_string(),
                    },
                    RequestPart::File {
                        file_data: FileData {
                            mime_type: file.mime_type.clone(),
                            file_uri: file.uri.clone(),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let generated: GenerateResponse = Self::check(response).await?.json().await?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ProviderError::malformed("No content in Gemini response"))
    }
}
