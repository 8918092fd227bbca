//! Script generation handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vse_models::{GenerateScriptResponse, ScriptRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Generate one script variation.
///
/// POST /api/generate-scripts
pub async fn generate_scripts(
    State(state): State<AppState>,
    payload: Result<Json<ScriptRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateScriptResponse>> {
    let Json(request) = payload.map_err(invalid_json)?;

    let variation = state.scripts.generate(&request).await?;

    Ok(Json(variation.into()))
}

fn invalid_json(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }
    ApiError::validation("Invalid request body", rejection.body_text())
}
