//! Request handlers.

pub mod health;
pub mod scripts;
pub mod videos;

pub use health::*;
pub use scripts::*;
pub use videos::*;
