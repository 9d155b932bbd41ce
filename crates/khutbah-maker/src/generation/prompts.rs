//! Prompt construction for the khutbah generation call.
//!
//! Pure string templating — deterministic, side-effect-free, cannot fail.
//! All four request parameters are interpolated verbatim.

use crate::generation::params::{Language, Length, Tone};

/// Instruction template for the generation call.
/// Replace `{length}`, `{language}`, `{topic}`, and `{tone}` before sending.
pub const KHUTBAH_PROMPT_TEMPLATE: &str = "You are an expert Islamic scholar tasked with \
    writing a {length} Friday khutbah (sermon) in {language} on the topic: {topic} with \
    tone: {tone}. Create a complete, well-structured Islamic khutbah that includes: \
    1. An appropriate title \
    2. Opening with praise to Allah and salutations on Prophet Muhammad (peace be upon him) \
    3. Introduction to the topic with relevant Quranic verses and Hadith \
    4. Main body with clear points, explanations, and guidance \
    5. Practical advice for the audience \
    6. Conclusion with a summary of key points \
    7. Closing duas (prayers) \
    The khutbah should be scholarly yet accessible, with proper citations of Quranic verses \
    and authentic Hadith. Format in Markdown with appropriate headings, paragraphs, and \
    emphasis. For Arabic text, include both Arabic script and transliteration where \
    appropriate.";

/// Builds the full instruction string for one generation request.
pub fn build_khutbah_prompt(
    topic: &str,
    length: Length,
    tone: Tone,
    language: Language,
) -> String {
    // Topic is interpolated last so a topic containing a literal placeholder
    // token cannot pick up another parameter's value.
    KHUTBAH_PROMPT_TEMPLATE
        .replace("{length}", &length.to_string())
        .replace("{language}", &language.to_string())
        .replace("{tone}", &tone.to_string())
        .replace("{topic}", topic)
}
