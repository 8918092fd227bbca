//! Clients for the external AI providers.
//!
//! This crate provides:
//! - A Gemini client for uploading videos and requesting transcripts
//! - An Anthropic Messages client for script writing
//! - The prompt templates sent to both
//! - The `MediaTranscriber` / `ScriptWriter` seams the server depends on

pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod traits;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use error::{ProviderError, ProviderResult};
pub use gemini::{GeminiClient, GeminiConfig, UploadedFile};
pub use prompts::{build_script_prompt, mode_instruction, TRANSCRIPT_INSTRUCTION};
pub use traits::{MediaTranscriber, ScriptWriter};
