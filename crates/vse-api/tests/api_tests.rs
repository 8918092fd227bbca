//! API integration tests against the router with mocked providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;
use vse_api::{create_router, ApiConfig, AppState};
use vse_models::VideoAsset;
use vse_providers::{
    MediaTranscriber, ProviderError, ProviderResult, ScriptWriter, UploadedFile,
};

mock! {
    pub Transcriber {}

    #[async_trait]
    impl MediaTranscriber for Transcriber {
        async fn upload_file(
            &self,
            api_key: &str,
            asset: &VideoAsset,
        ) -> ProviderResult<UploadedFile>;
        async fn generate_transcript(
            &self,
            api_key: &str,
            file: &UploadedFile,
        ) -> ProviderResult<String>;
    }
}

mock! {
    pub Writer {}

    #[async_trait]
    impl ScriptWriter for Writer {
        async fn complete(&self, prompt: &str) -> ProviderResult<String>;
    }
}

const BOUNDARY: &str = "vse-test-boundary";

fn test_config() -> ApiConfig {
    ApiConfig {
        processing_delay: Duration::ZERO,
        rate_limit_rps: 1000,
        ..ApiConfig::default()
    }
}

fn router(transcriber: MockTranscriber, writer: Option<MockWriter>) -> Router {
    let writer = writer.map(|w| Arc::new(w) as Arc<dyn ScriptWriter>);
    let state = AppState::with_providers(test_config(), Arc::new(transcriber), writer);
    create_router(state, None)
}

/// Transcriber that must never be reached.
fn idle_transcriber() -> MockTranscriber {
    let mut transcriber = MockTranscriber::new();
    transcriber.expect_upload_file().times(0);
    transcriber.expect_generate_transcript().times(0);
    transcriber
}

fn multipart_body(api_key: Option<&str>, videos: &[(&str, &str)]) -> Vec<u8> {
    let mut body = String::new();
    for (filename, content) in videos {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"videos\"; filename=\"{filename}\"\r\nContent-Type: video/mp4\r\n\r\n{content}\r\n"
        ));
    }
    if let Some(key) = api_key {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"geminiApiKey\"\r\n\r\n{key}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body.into_bytes()
}

fn videos_request(api_key: Option<&str>, videos: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/process-videos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(api_key, videos)))
        .unwrap()
}

fn scripts_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-scripts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn uploaded(asset: &VideoAsset) -> UploadedFile {
    UploadedFile {
        uri: format!("https://files.example/{}", asset.filename),
        name: format!("files/{}", asset.filename),
        mime_type: asset.media_type.clone(),
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = router(idle_transcriber(), None);

    for uri in ["/api/health", "/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_process_videos_preserves_order() {
    let mut transcriber = MockTranscriber::new();
    transcriber
        .expect_upload_file()
        .withf(|key, _| key == "caller-key")
        .times(3)
        .returning(|_, asset| Ok(uploaded(asset)));
    transcriber
        .expect_generate_transcript()
        .withf(|key, _| key == "caller-key")
        .times(3)
        .returning(|_, file| Ok(format!("transcript for {}", file.name)));

    let app = router(transcriber, None);
    let response = app
        .oneshot(videos_request(
            Some("caller-key"),
            &[("a.mp4", "aaa"), ("b.mp4", "bbb"), ("c.mp4", "ccc")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "transcripts": [
                "transcript for files/a.mp4",
                "transcript for files/b.mp4",
                "transcript for files/c.mp4"
            ]
        })
    );
}

#[tokio::test]
async fn test_process_videos_requires_key() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(videos_request(None, &[("a.mp4", "aaa")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Gemini API key required" })
    );
}

#[tokio::test]
async fn test_process_videos_rejects_empty_batch() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(videos_request(Some("caller-key"), &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "At least one video file is required"
    );
}

#[tokio::test]
async fn test_process_videos_rejects_fourth_video() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(videos_request(
            Some("caller-key"),
            &[("a.mp4", "a"), ("b.mp4", "b"), ("c.mp4", "c"), ("d.mp4", "d")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "At most 3 videos may be uploaded"
    );
}

#[tokio::test]
async fn test_process_videos_fails_whole_batch() {
    let mut transcriber = MockTranscriber::new();
    transcriber
        .expect_upload_file()
        .returning(|_, asset| {
            if asset.filename == "b.mp4" {
                Err(ProviderError::from_upstream(
                    StatusCode::FORBIDDEN,
                    r#"{"error":{"code":403,"message":"API key not valid. Please pass a valid API key."}}"#,
                ))
            } else {
                Ok(uploaded(asset))
            }
        });
    transcriber
        .expect_generate_transcript()
        .returning(|_, _| Ok("transcript".to_string()));

    let app = router(transcriber, None);
    let response = app
        .oneshot(videos_request(
            Some("bad-key"),
            &[("a.mp4", "aaa"), ("b.mp4", "bbb")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "error": "Failed to process videos",
            "details": "API key not valid. Please pass a valid API key."
        })
    );
}

#[tokio::test]
async fn test_generate_scripts_returns_mode() {
    let mut writer = MockWriter::new();
    writer
        .expect_complete()
        .withf(|prompt| {
            prompt.contains("Clip 1: hook line")
                && prompt.contains("Clip 2: payoff line")
                && prompt.contains("PRODUCT: https://example.com/p")
        })
        .times(1)
        .returning(|_| Ok("Generated script".to_string()));

    let app = router(idle_transcriber(), Some(writer));
    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["hook line", "   ", "payoff line"],
            "productLink": "https://example.com/p",
            "mode": "AI_OPTIMIZED"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "script": "Generated script", "mode": "AI_OPTIMIZED" })
    );
}

#[tokio::test]
async fn test_generate_scripts_validates_before_calling_writer() {
    let mut writer = MockWriter::new();
    writer.expect_complete().times(0);

    let app = router(idle_transcriber(), Some(writer));
    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["only one", ""],
            "productLink": "https://example.com/p",
            "mode": "STRICT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "error": "Invalid script request",
            "details": "At least 2 clip transcripts are required"
        })
    );
}

#[tokio::test]
async fn test_generate_scripts_counts_every_clip_entry() {
    let mut writer = MockWriter::new();
    writer.expect_complete().times(0);

    let app = router(idle_transcriber(), Some(writer));
    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["a", "b", "", ""],
            "productLink": "https://example.com/p",
            "mode": "STRICT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "error": "Invalid script request",
            "details": "At most 3 clips may be supplied"
        })
    );
}

#[tokio::test]
async fn test_generate_scripts_rejects_unknown_mode() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["a", "b"],
            "productLink": "https://example.com/p",
            "mode": "CHAOTIC"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid request body");
}

#[tokio::test]
async fn test_generate_scripts_without_server_key() {
    let app = router(idle_transcriber(), None);

    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["a", "b"],
            "productLink": "https://example.com/p",
            "mode": "STRICT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "error": "Failed to generate script",
            "details": "ANTHROPIC_API_KEY not configured"
        })
    );
}

#[tokio::test]
async fn test_generate_scripts_surfaces_upstream_message() {
    let mut writer = MockWriter::new();
    writer.expect_complete().times(1).returning(|_| {
        Err(ProviderError::from_upstream(
            StatusCode::UNAUTHORIZED,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        ))
    });

    let app = router(idle_transcriber(), Some(writer));
    let response = app
        .oneshot(scripts_request(json!({
            "clips": ["a", "b"],
            "productLink": "https://example.com/p",
            "mode": "STRICT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Failed to generate script", "details": "invalid x-api-key" })
    );
}

#[tokio::test]
async fn test_rate_limiting() {
    let config = ApiConfig {
        rate_limit_rps: 1,
        ..test_config()
    };
    let state = AppState::with_providers(config, Arc::new(idle_transcriber()), None);
    let app = create_router(state, None);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate-scripts")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-Forwarded-For", "192.168.1.100")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        statuses.push(response.status());
    }

    assert_eq!(statuses[0], StatusCode::BAD_REQUEST);
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));
}

fn small_body_router() -> Router {
    let config = ApiConfig {
        max_body_size: 16,
        ..test_config()
    };
    let state = AppState::with_providers(config, Arc::new(idle_transcriber()), None);
    create_router(state, None)
}

#[tokio::test]
async fn test_oversized_upload_gets_json_error() {
    let body = multipart_body(Some("user-key"), &[("a.mp4", "far more than sixteen bytes")]);
    let request = Request::builder()
        .method("POST")
        .uri("/api/process-videos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let response = small_body_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Request body too large" })
    );
}

#[tokio::test]
async fn test_oversized_json_without_length_gets_json_error() {
    // No Content-Length, so the limit trips while the handler reads the body.
    let response = small_body_router()
        .oneshot(scripts_request(json!({
            "clips": ["a long first clip", "a long second clip"],
            "productLink": "https://example.com/p",
            "mode": "STRICT"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Request body too large" })
    );
}
