//! Request parameters — the caller-facing vocabulary of a generation call.
//!
//! Display labels are exactly the strings interpolated into the prompt, so
//! the model sees the same wording the caller selected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired khutbah length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    #[default]
    Short,
    Long,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Length::Short => "Short",
            Length::Long => "Long",
        };
        f.write_str(label)
    }
}

/// Tone of the khutbah. Drives the register the model writes in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Scholarly,
    #[default]
    Inspirational,
    Practical,
    Reflective,
    Motivational,
    Educational,
    Historical,
    Narrative,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tone::Scholarly => "Scholarly",
            Tone::Inspirational => "Inspirational",
            Tone::Practical => "Practical",
            Tone::Reflective => "Reflective",
            Tone::Motivational => "Motivational",
            Tone::Educational => "Educational",
            Tone::Historical => "Historical",
            Tone::Narrative => "Narrative",
        };
        f.write_str(label)
    }
}

/// Target language of the khutbah.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "Bahasa Malaysia")]
    BahasaMalaysia,
    Arabic,
    English,
    Mandarin,
    Tamil,
}

impl Language {
    /// Lowercased, underscore-joined form used in output filenames.
    pub fn file_suffix(&self) -> String {
        self.to_string().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Language::BahasaMalaysia => "Bahasa Malaysia",
            Language::Arabic => "Arabic",
            Language::English => "English",
            Language::Mandarin => "Mandarin",
            Language::Tamil => "Tamil",
        };
        f.write_str(label)
    }
}

/// One khutbah generation request. Everything except the topic defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default)]
    pub length: Length,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub language: Language,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            length: Length::default(),
            tone: Tone::default(),
            language: Language::default(),
        }
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}
