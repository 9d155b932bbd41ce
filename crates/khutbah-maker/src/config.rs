use std::path::PathBuf;

/// Default Gemini model used when the caller does not override it.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-thinking-exp-01-21";

/// Configuration for the text-generation backend and output location.
///
/// Constructed explicitly by the caller and handed to [`crate::KhutbahMaker`]
/// at build time — there is no process-wide singleton and the core never
/// reads environment variables.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model name sent to the `generateContent` endpoint.
    pub model: String,
    /// API key. When `None`, no key is attached to the request and the
    /// deployment is expected to provide ambient credentials (e.g. a proxy).
    pub api_key: Option<String>,
    /// Directory PDFs are written to. Defaults to the platform temp dir.
    pub output_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            output_dir: None,
        }
    }
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Resolved output directory: configured value or the platform temp dir.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
