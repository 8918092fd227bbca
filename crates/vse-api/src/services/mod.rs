//! Request-level services sitting between handlers and provider clients.

pub mod scripts;
pub mod transcription;

pub use scripts::ScriptService;
pub use transcription::TranscriptionService;
