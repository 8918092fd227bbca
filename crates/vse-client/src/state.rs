//! Immutable form state driven by the orchestrator.
//!
//! Every transition takes the state by value and returns the next one, so a
//! caller always holds a consistent snapshot.

use vse_models::{ScriptVariation, VideoAsset, MAX_SCRIPT_CLIPS, MAX_VIDEOS};

/// Notice shown after a successful video phase.
pub const VIDEOS_PROCESSED_NOTICE: &str = "Videos processed! Review transcripts below.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub gemini_api_key: String,
    pub videos: [Option<VideoAsset>; MAX_VIDEOS],
    pub clips: Vec<String>,
    pub product_link: String,
    pub processing_videos: bool,
    pub loading: bool,
    pub scripts: Option<Vec<ScriptVariation>>,
    pub selected_variation: usize,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            videos: Default::default(),
            clips: vec![String::new(); MAX_SCRIPT_CLIPS],
            product_link: String::new(),
            processing_videos: false,
            loading: false,
            scripts: None,
            selected_variation: 0,
            error: None,
            notice: None,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(self, key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: key.into(),
            ..self
        }
    }

    /// Put a video in `slot`. Slots past the last one are ignored.
    pub fn with_video(mut self, slot: usize, asset: VideoAsset) -> Self {
        if let Some(entry) = self.videos.get_mut(slot) {
            *entry = Some(asset);
        }
        self
    }

    pub fn without_video(mut self, slot: usize) -> Self {
        if let Some(entry) = self.videos.get_mut(slot) {
            *entry = None;
        }
        self
    }

    /// Overwrite the clip in `slot`, growing the list up to the clip limit.
    pub fn with_clip(mut self, slot: usize, text: impl Into<String>) -> Self {
        if slot >= MAX_SCRIPT_CLIPS {
            return self;
        }
        if self.clips.len() <= slot {
            self.clips.resize(slot + 1, String::new());
        }
        self.clips[slot] = text.into();
        self
    }

    pub fn with_product_link(self, link: impl Into<String>) -> Self {
        Self {
            product_link: link.into(),
            ..self
        }
    }

    /// Select a generated variation; out-of-range indexes leave the state alone.
    pub fn select_variation(self, index: usize) -> Self {
        let in_range = self
            .scripts
            .as_ref()
            .is_some_and(|scripts| index < scripts.len());

        if in_range {
            Self {
                selected_variation: index,
                ..self
            }
        } else {
            self
        }
    }

    pub fn selected_script(&self) -> Option<&ScriptVariation> {
        self.scripts
            .as_ref()
            .and_then(|scripts| scripts.get(self.selected_variation))
    }

    /// Videos currently selected, in slot order.
    pub fn selected_videos(&self) -> Vec<VideoAsset> {
        self.videos.iter().flatten().cloned().collect()
    }

    /// Clips with content, in slot order.
    pub fn filled_clips(&self) -> Vec<String> {
        self.clips
            .iter()
            .filter(|c| !c.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..self
        }
    }

    pub(crate) fn start_video_processing(self) -> Self {
        Self {
            processing_videos: true,
            error: None,
            notice: None,
            ..self
        }
    }

    /// Replace the clips with fresh transcripts, padded to the clip slots.
    pub(crate) fn finish_video_processing(self, transcripts: Vec<String>) -> Self {
        let mut clips = transcripts;
        if clips.len() < MAX_SCRIPT_CLIPS {
            clips.resize(MAX_SCRIPT_CLIPS, String::new());
        }

        Self {
            clips,
            processing_videos: false,
            error: None,
            notice: Some(VIDEOS_PROCESSED_NOTICE.to_string()),
            ..self
        }
    }

    pub(crate) fn fail_video_processing(self, message: impl Into<String>) -> Self {
        Self {
            processing_videos: false,
            error: Some(message.into()),
            ..self
        }
    }

    pub(crate) fn start_script_generation(self) -> Self {
        Self {
            loading: true,
            scripts: None,
            error: None,
            notice: None,
            ..self
        }
    }

    pub(crate) fn finish_script_generation(self, scripts: Vec<ScriptVariation>) -> Self {
        Self {
            loading: false,
            scripts: Some(scripts),
            selected_variation: 0,
            ..self
        }
    }

    pub(crate) fn fail_script_generation(self, message: impl Into<String>) -> Self {
        Self {
            loading: false,
            scripts: None,
            error: Some(message.into()),
            ..self
        }
    }
}
