//! Client side of the viral script engine.
//!
//! This crate provides:
//! - `ApiClient` for the backend endpoints
//! - `FormState`, an immutable snapshot of the user's inputs and results
//! - `Orchestrator`, which runs the video phase and the script phase
//! - The `vse` command-line front end

pub mod api;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use api::{ApiClient, DEFAULT_API_URL};
pub use error::{ClientError, ClientResult};
pub use orchestrator::{copy_selected, Orchestrator};
pub use state::FormState;
