//! Shared data models for the viral script engine.
//!
//! This crate provides Serde-serializable types for:
//! - Video assets submitted for transcription
//! - Script generation requests, modes and variations
//! - HTTP response bodies shared by the server and the client

pub mod api;
pub mod error;
pub mod mode;
pub mod script;
pub mod video;

// Re-export common types
pub use api::{ErrorBody, HealthResponse, ProcessVideosResponse};
pub use error::{ModelError, ModelResult};
pub use mode::ScriptMode;
pub use script::{
    GenerateScriptResponse, ScriptRequest, ScriptVariation, MAX_SCRIPT_CLIPS, MIN_SCRIPT_CLIPS,
};
pub use video::{media_type_for_filename, VideoAsset, DEFAULT_MEDIA_TYPE, MAX_VIDEOS};
