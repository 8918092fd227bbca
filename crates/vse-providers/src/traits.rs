//! Seams between the request handlers and the provider clients.

use async_trait::async_trait;
use vse_models::VideoAsset;

use crate::error::ProviderResult;
use crate::gemini::UploadedFile;

/// Uploads videos and turns them into description + transcript text.
#[async_trait]
pub trait MediaTranscriber: Send + Sync {
    /// Store the asset with the provider, authenticated by the caller's key.
    async fn upload_file(&self, api_key: &str, asset: &VideoAsset) -> ProviderResult<UploadedFile>;

    /// Ask the provider to describe and transcribe an uploaded file.
    async fn generate_transcript(&self, api_key: &str, file: &UploadedFile)
        -> ProviderResult<String>;
}

/// Writes text from a single user prompt.
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    async fn complete(&self, prompt: &str) -> ProviderResult<String>;
}
