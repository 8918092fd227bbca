//! Script ordering modes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Ordering policy for script generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptMode {
    /// Use every clip, in the order given
    Strict,
    /// The model may reorder or drop clips for impact
    AiOptimized,
}

impl ScriptMode {
    /// Both modes, in the order variations are displayed.
    pub const ALL: [ScriptMode; 2] = [ScriptMode::Strict, ScriptMode::AiOptimized];

    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptMode::Strict => "STRICT",
            ScriptMode::AiOptimized => "AI_OPTIMIZED",
        }
    }

    /// Short label shown next to a generated variation.
    pub fn label(&self) -> &'static str {
        match self {
            ScriptMode::Strict => "Your Vision",
            ScriptMode::AiOptimized => "AI Optimized",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScriptMode::Strict => "Uses clips in your exact order",
            ScriptMode::AiOptimized => "AI picks best clip order",
        }
    }
}

impl fmt::Display for ScriptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScriptMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "STRICT" => Ok(ScriptMode::Strict),
            "AI_OPTIMIZED" => Ok(ScriptMode::AiOptimized),
            _ => Err(ModelError::InvalidMode(s.to_string())),
        }
    }
}
