//! Video transcription handler.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};
use vse_models::{ProcessVideosResponse, VideoAsset, MAX_VIDEOS};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart part carrying a video file.
pub const VIDEOS_FIELD: &str = "videos";
/// Multipart part carrying the caller's Gemini key.
pub const API_KEY_FIELD: &str = "geminiApiKey";

/// Parsed `POST /api/process-videos` form.
#[derive(Debug, Default)]
struct VideoUpload {
    api_key: Option<String>,
    videos: Vec<VideoAsset>,
}

/// Transcribe up to three uploaded videos.
///
/// POST /api/process-videos
pub async fn process_videos(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<ProcessVideosResponse>> {
    let upload = read_upload(multipart).await?;
    let api_key = upload.api_key.unwrap_or_default();

    let transcripts = state
        .transcription
        .transcribe_all(&api_key, &upload.videos)
        .await?;

    info!(count = transcripts.len(), "All videos processed");
    Ok(Json(ProcessVideosResponse { transcripts }))
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<VideoUpload> {
    let mut upload = VideoUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            VIDEOS_FIELD => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    debug!("Skipping videos part without a filename");
                    continue;
                };
                if upload.videos.len() == MAX_VIDEOS {
                    return Err(ApiError::bad_request(format!(
                        "At most {} videos may be uploaded",
                        MAX_VIDEOS
                    )));
                }

                let media_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(invalid_multipart)?;
                debug!(filename = %filename, bytes = data.len(), "Received video part");

                upload
                    .videos
                    .push(VideoAsset::new(data, media_type.as_deref(), filename));
            }
            API_KEY_FIELD => {
                upload.api_key = Some(field.text().await.map_err(invalid_multipart)?);
            }
            other => debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    Ok(upload)
}

fn invalid_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }
    ApiError::validation("Invalid multipart body", err.body_text())
}
