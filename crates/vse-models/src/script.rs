//! Script generation payloads.

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{ModelError, ModelResult};
use crate::mode::ScriptMode;

/// Minimum number of non-empty clips needed to write a script.
pub const MIN_SCRIPT_CLIPS: usize = 2;

/// Maximum number of clips a script request may carry.
pub const MAX_SCRIPT_CLIPS: usize = 3;

/// Body of `POST /api/generate-scripts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    /// Clip transcripts, in the order the caller wants them used
    #[validate(custom(function = "validate_clips"))]
    pub clips: Vec<String>,
    /// Product URL or name the script should sell
    #[validate(custom(function = "validate_product_link"))]
    pub product_link: String,
    pub mode: ScriptMode,
}

impl ScriptRequest {
    pub fn new(clips: Vec<String>, product_link: impl Into<String>, mode: ScriptMode) -> Self {
        Self {
            clips,
            product_link: product_link.into(),
            mode,
        }
    }

    /// Clips that contain something other than whitespace, order preserved.
    pub fn non_empty_clips(&self) -> Vec<&str> {
        self.clips
            .iter()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
            .collect()
    }

    /// Run field validation and flatten the failures into one message.
    pub fn check(&self) -> ModelResult<()> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        Err(ModelError::validation(messages.join("; ")))
    }
}

#[allow(clippy::ptr_arg)]
fn validate_clips(clips: &Vec<String>) -> Result<(), ValidationError> {
    if clips.len() > MAX_SCRIPT_CLIPS {
        return Err(ValidationError::new("too_many_clips").with_message(Cow::Owned(format!(
            "At most {} clips may be supplied",
            MAX_SCRIPT_CLIPS
        ))));
    }

    let filled = clips.iter().filter(|c| !c.trim().is_empty()).count();
    if filled < MIN_SCRIPT_CLIPS {
        return Err(ValidationError::new("too_few_clips").with_message(Cow::Owned(format!(
            "At least {} clip transcripts are required",
            MIN_SCRIPT_CLIPS
        ))));
    }

    Ok(())
}

fn validate_product_link(link: &str) -> Result<(), ValidationError> {
    if link.trim().is_empty() {
        return Err(ValidationError::new("missing_product")
            .with_message(Cow::Borrowed("A product link is required")));
    }
    Ok(())
}

/// One generated script, tagged with the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptVariation {
    pub mode: ScriptMode,
    pub script: String,
}

/// Body returned by `POST /api/generate-scripts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerateScriptResponse {
    pub script: String,
    pub mode: ScriptMode,
}

impl From<GenerateScriptResponse> for ScriptVariation {
    fn from(resp: GenerateScriptResponse) -> Self {
        Self {
            mode: resp.mode,
            script: resp.script,
        }
    }
}

impl From<ScriptVariation> for GenerateScriptResponse {
    fn from(variation: ScriptVariation) -> Self {
        Self {
            script: variation.script,
            mode: variation.mode,
        }
    }
}
