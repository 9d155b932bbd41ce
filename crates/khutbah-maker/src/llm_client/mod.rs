//! LLM client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the generative-language API
//! directly. All model interactions go through [`TextModel`], so tests can
//! substitute a mock and the orchestrator never sees wire-format details.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ModelConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned empty content")]
    EmptyContent,
}

/// Seam between the orchestrator and the remote text model.
///
/// One call per prompt, no retries, no timeout override — callers rely on the
/// underlying client's defaults and wrap a deadline externally if they need one.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any text came back.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client.
///
/// The API key is attached as a query parameter only when configured; without
/// one the request goes out bare, for deployments where a gateway injects
/// credentials.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model);

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text().ok_or(LlmError::EmptyContent)?;

        debug!(
            "Gemini call succeeded: model={}, response_chars={}",
            self.model,
            text.len()
        );

        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fence stripping
// ────────────────────────────────────────────────────────────────────────────

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z]*\n").expect("fence-open regex is valid"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\n?").expect("fence-close regex is valid"));

/// Strips ```` ```markdown ```` / ```` ``` ```` fence lines a model may wrap
/// around its output, then trims surrounding whitespace.
pub fn strip_markdown_fences(text: &str) -> String {
    let text = FENCE_OPEN.replace_all(text, "");
    let text = FENCE_CLOSE.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let input = "```markdown\n# Title\n\nBody text.\n```";
        assert_eq!(strip_markdown_fences(input), "# Title\n\nBody text.");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n# Title\n\nBody text.\n```\n";
        assert_eq!(strip_markdown_fences(input), "# Title\n\nBody text.");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "  # Title\n\nBody text.  ";
        assert_eq!(strip_markdown_fences(input), "# Title\n\nBody text.");
    }

    #[test]
    fn test_strip_fences_trailing_fence_without_newline() {
        let input = "```md\nBody\n```";
        assert_eq!(strip_markdown_fences(input), "Body");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_response_text_none_when_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "a prompt" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "a prompt");
    }

    #[test]
    fn test_gemini_error_body_parses() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
