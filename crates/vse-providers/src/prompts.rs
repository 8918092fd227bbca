//! Prompt templates sent to the providers.

use vse_models::ScriptMode;

/// Instruction sent alongside every uploaded video.
pub const TRANSCRIPT_INSTRUCTION: &str = r#"Analyze this video clip and provide:
1. A brief description of who/what is in the video (e.g., "TikTok video of woman showing McDonald's burger", "Kevin Gates on livestream", "Dr. Bobby Price podcast interview")
2. A complete transcript of what is said

Format your response EXACTLY as:
Description: [your description]
Transcript: [full transcript]"#;

const STYLE_EXAMPLES: &str = r#"Generate a script matching these example patterns:

EXAMPLE HOOK STYLES:
"Why the hell is nobody talking about what just happened on this episode of the Kardashians? I'm gonna play the clip for you right here."
"This guy went after the most predatory industry in the world and got silenced for it. Watch this clip before they take it down."
"Why is nobody talking about how everyone is just aging in reverse? This mother and daughter are exposing the truth."
"This is the most messed up Simpsons prediction ever, and America made this evil stuff come true!?"

EXAMPLE SCRIPT SEGMENT:
**Backend 5 — POINTING UP**
NO CAPTIONS ON SCREEN. NO CAMERA MOVEMENTS. NO EDITS.
Handheld phone video style. Make the avatar say in a concerned tone:
"Now the crazy thing is our bodies naturally produce NAD, but after we turn around 30 years old, that's when our NAD levels start to plummet and the aging process starts."

EXAMPLE PRODUCT REVEAL:
**Backend 10 — HOLDING PRODUCT**
NO CAPTIONS ON SCREEN. NO CAMERA MOVEMENTS. NO EDITS.
Handheld phone video style. Make the avatar say in a helpful tone:
"Now I spoke to my doctor and this is the one they recommended for me from Micro Ingredients."

EXAMPLE CTA:
**Backend 13 — HOLDING PRODUCT**
NO CAPTIONS ON SCREEN. NO CAMERA MOVEMENTS. NO EDITS.
Handheld phone video style. Make the avatar say in a closing CTA tone:
"So if you did wanna try this and you're still seeing the link in this video, I would run and grab a bottle before they are completely gone."

ALTERNATIVE CTA EXAMPLES:
"If you see that orange cart down below, that means you can still pick up one, but if that cart isn't there, they already sold out."
"Link's right here in the video. If you can still see it, grab some while you can."
"The button should be right there on this video. If it's still showing up, they haven't sold out yet."

---"#;

const FORMAT_RULES: &str = r#"Generate a complete script following this EXACT format and style with 12 backend segments, 2 hooks, and marked clip placements.

CRITICAL RULES:
- Keep EVERY dialogue segment under 20 words
- Use casual language (swearing is natural where appropriate)
- Reference SPECIFIC sources in hooks (names, shows, platforms)
- Match the energy/style of the example hooks
- Each segment = ~8 seconds of speaking
- Mark clip placements clearly"#;

/// Clip-ordering instruction for a mode.
pub fn mode_instruction(mode: ScriptMode) -> &'static str {
    match mode {
        ScriptMode::Strict => "Use clips in exact order provided (1→2→3). Use ALL clips.",
        ScriptMode::AiOptimized => {
            "Analyze clips and reorder for maximum impact. May skip clips if needed."
        }
    }
}

/// Build the single user message for a script request.
///
/// Clips are numbered from 1 in the order given.
pub fn build_script_prompt<S: AsRef<str>>(
    clips: &[S],
    product_link: &str,
    mode: ScriptMode,
) -> String {
    let clip_list = clips
        .iter()
        .enumerate()
        .map(|(i, clip)| format!("Clip {}: {}", i + 1, clip.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{STYLE_EXAMPLES}\n\nYOUR TASK:\n{instruction}\n\nCLIPS PROVIDED:\n{clip_list}\n\nPRODUCT: {product_link}\n\n{FORMAT_RULES}",
        instruction = mode_instruction(mode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clips_are_one_indexed_in_order() {
        let prompt = build_script_prompt(
            &["hello", "world"],
            "https://example.com/p",
            ScriptMode::Strict,
        );
        let first = prompt.find("Clip 1: hello").unwrap();
        let second = prompt.find("Clip 2: world").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Clip 1: hello\n\nClip 2: world"));
        assert!(prompt.contains("PRODUCT: https://example.com/p"));
    }

    #[test]
    fn test_modes_produce_distinct_prompts() {
        let clips = ["hello", "world"];
        let strict = build_script_prompt(&clips, "p", ScriptMode::Strict);
        let optimized = build_script_prompt(&clips, "p", ScriptMode::AiOptimized);

        assert_ne!(strict, optimized);
        assert!(strict.contains(mode_instruction(ScriptMode::Strict)));
        assert!(!strict.contains(mode_instruction(ScriptMode::AiOptimized)));
        assert!(optimized.contains("May skip clips if needed."));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = build_script_prompt(&["a", "b", "c"], "p", ScriptMode::AiOptimized);
        let hooks = prompt.find("EXAMPLE HOOK STYLES:").unwrap();
        let task = prompt.find("YOUR TASK:").unwrap();
        let clips = prompt.find("CLIPS PROVIDED:").unwrap();
        let product = prompt.find("PRODUCT: p").unwrap();
        let rules = prompt.find("CRITICAL RULES:").unwrap();
        assert!(hooks < task && task < clips && clips < product && product < rules);
        assert!(prompt.contains("under 20 words"));
    }

    #[test]
    fn test_transcript_instruction_asks_for_both_fields() {
        assert!(TRANSCRIPT_INSTRUCTION.contains("Description: [your description]"));
        assert!(TRANSCRIPT_INSTRUCTION.contains("Transcript: [full transcript]"));
    }
}
