//! Khutbah generation — orchestrates the full pipeline.
//!
//! Flow: validate topic → allocate task id → build prompt → model call →
//! fence stripping → PDF render → return path + cleaned markdown.
//!
//! The public [`KhutbahMaker::generate_khutbah`] never returns an error:
//! every failure is logged with the task id and collapses to `(None, None)`.
//! [`KhutbahMaker::try_generate`] exposes the structured error for callers
//! that need to distinguish causes.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::ModelConfig;
use crate::errors::KhutbahError;
use crate::generation::params::GenerationRequest;
use crate::generation::prompts::build_khutbah_prompt;
use crate::llm_client::{strip_markdown_fences, GeminiClient, LlmError, TextModel};
use crate::render::render_khutbah_pdf;
use crate::task::TaskId;

/// A successfully generated khutbah: the PDF on disk plus the cleaned
/// markdown it was rendered from. Neither outlives the caller's interest —
/// nothing is cached or persisted elsewhere.
#[derive(Debug, Clone)]
pub struct GeneratedKhutbah {
    pub pdf_path: PathBuf,
    pub markdown: String,
}

/// The khutbah generation pipeline. Holds the injected text model and the
/// resolved output directory; no other state survives between calls.
pub struct KhutbahMaker {
    model: Arc<dyn TextModel>,
    output_dir: PathBuf,
}

impl KhutbahMaker {
    /// Builds a generator backed by the Gemini client described by `config`.
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            model: Arc::new(GeminiClient::new(config)),
            output_dir: config.resolve_output_dir(),
        }
    }

    /// Builds a generator over any [`TextModel`]. Used by tests and by
    /// embedders that bring their own backend.
    pub fn with_model(model: Arc<dyn TextModel>, output_dir: PathBuf) -> Self {
        Self { model, output_dir }
    }

    /// Generates a khutbah PDF and returns `(pdf path, cleaned markdown)`.
    ///
    /// An empty topic is rejected before a task id is allocated. Any stage
    /// failure — model, render, or a panicking render task — is logged and
    /// yields `(None, None)`; this boundary never propagates an error.
    pub async fn generate_khutbah(
        &self,
        request: GenerationRequest,
    ) -> (Option<PathBuf>, Option<String>) {
        if request.topic.is_empty() {
            error!("Topic is required!");
            return (None, None);
        }

        let task_id = TaskId::new();
        info!("[{task_id}] Khutbah generation started!");

        match self.try_generate(&request, &task_id).await {
            Ok(generated) => {
                info!("[{task_id}] Khutbah generation complete!");
                (Some(generated.pdf_path), Some(generated.markdown))
            }
            Err(e) => {
                error!("[{task_id}] Khutbah generation failed: {e}");
                (None, None)
            }
        }
    }

    /// Runs the pipeline, surfacing structured stage errors.
    pub async fn try_generate(
        &self,
        request: &GenerationRequest,
        task_id: &TaskId,
    ) -> Result<GeneratedKhutbah, KhutbahError> {
        if request.topic.is_empty() {
            return Err(KhutbahError::Validation("Topic is required".to_string()));
        }

        // Stage 1: model call
        let prompt = build_khutbah_prompt(
            &request.topic,
            request.length,
            request.tone,
            request.language,
        );
        info!("[{task_id}] Generating khutbah on topic: {}", request.topic);

        let raw = self.model.generate_text(&prompt).await?;
        let markdown = strip_markdown_fences(&raw);
        if markdown.is_empty() {
            return Err(KhutbahError::Generation(LlmError::EmptyContent));
        }

        // Stage 2: PDF render. CPU- and file-bound, so it runs off the async
        // runtime; a panic inside surfaces as a join error here instead of
        // unwinding into the caller.
        let pdf_path = {
            let markdown = markdown.clone();
            let topic = request.topic.clone();
            let language = request.language;
            let task_id = task_id.clone();
            let output_dir = self.output_dir.clone();
            tokio::task::spawn_blocking(move || {
                render_khutbah_pdf(&markdown, &topic, language, &task_id, &output_dir)
            })
            .await
            .map_err(|e| {
                KhutbahError::Internal(anyhow::anyhow!("render task panicked: {e}"))
            })??
        };

        Ok(GeneratedKhutbah { pdf_path, markdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::generation::params::{Language, Length, Tone};

    /// Scripted model: returns a fixed response (or failure) and counts calls.
    struct ScriptedModel {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::Api {
                    status: 503,
                    message: "backend unavailable".to_string(),
                }),
            }
        }
    }

    fn maker_with(model: Arc<ScriptedModel>, dir: &tempfile::TempDir) -> KhutbahMaker {
        KhutbahMaker::with_model(model, dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_empty_topic_rejected_without_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::ok("# Title\n\nBody."));
        let maker = maker_with(model.clone(), &dir);

        let (path, text) = maker.generate_khutbah(GenerationRequest::new("")).await;

        assert!(path.is_none());
        assert!(text.is_none());
        assert_eq!(model.call_count(), 0, "model must not be called");
    }

    #[tokio::test]
    async fn test_model_failure_short_circuits_render() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::failing());
        let maker = maker_with(model.clone(), &dir);

        let (path, text) = maker
            .generate_khutbah(GenerationRequest::new("Patience"))
            .await;

        assert!(path.is_none());
        assert!(text.is_none());
        assert_eq!(model.call_count(), 1);
        // Renderer never ran: nothing was written to the output directory.
        let written = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(written, 0, "renderer must not be invoked after model failure");
    }

    #[tokio::test]
    async fn test_successful_generation_returns_path_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::ok(
            "# The Virtue of Patience\n\n## Opening\n\nAlhamdulillah.",
        ));
        let maker = maker_with(model, &dir);

        let (path, text) = maker
            .generate_khutbah(GenerationRequest::new("Patience"))
            .await;

        let path = path.expect("pdf path");
        let text = text.expect("cleaned markdown");
        assert!(path.exists());
        assert!(text.starts_with("# The Virtue of Patience"));
    }

    #[tokio::test]
    async fn test_fenced_response_is_cleaned_before_render() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::ok(
            "```markdown\n# Gratitude\n\nShukr.\n```",
        ));
        let maker = maker_with(model, &dir);

        let (_, text) = maker
            .generate_khutbah(GenerationRequest::new("Gratitude"))
            .await;

        let text = text.expect("cleaned markdown");
        assert!(!text.contains("```"), "fences must be stripped: {text}");
        assert!(text.starts_with("# Gratitude"));
    }

    #[tokio::test]
    async fn test_empty_model_output_is_a_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::ok("```\n```"));
        let maker = maker_with(model, &dir);

        let result = maker
            .try_generate(&GenerationRequest::new("Patience"), &TaskId::new())
            .await;

        assert!(matches!(
            result,
            Err(KhutbahError::Generation(LlmError::EmptyContent))
        ));
    }

    #[tokio::test]
    async fn test_try_generate_distinguishes_validation_from_model_failure() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::failing());
        let maker = maker_with(model, &dir);

        let validation = maker
            .try_generate(&GenerationRequest::new(""), &TaskId::new())
            .await;
        assert!(matches!(validation, Err(KhutbahError::Validation(_))));

        let generation = maker
            .try_generate(&GenerationRequest::new("Patience"), &TaskId::new())
            .await;
        assert!(matches!(generation, Err(KhutbahError::Generation(_))));
    }

    #[tokio::test]
    async fn test_render_failure_is_a_render_error_and_collapses() {
        // An output directory that does not exist makes the file write fail.
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("nested");
        let model = Arc::new(ScriptedModel::ok("# Sabar\n\nBody."));
        let maker = KhutbahMaker::with_model(model, missing);

        let result = maker
            .try_generate(&GenerationRequest::new("Sabar"), &TaskId::new())
            .await;
        assert!(matches!(result, Err(KhutbahError::Render(_))));

        let (path, text) = maker.generate_khutbah(GenerationRequest::new("Sabar")).await;
        assert!(path.is_none());
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_repeated_calls_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::ok("# Sabar\n\nBody."));
        let maker = maker_with(model.clone(), &dir);

        let request = GenerationRequest::new("Sabar")
            .with_length(Length::Short)
            .with_tone(Tone::Reflective)
            .with_language(Language::BahasaMalaysia);

        let (first, _) = maker.generate_khutbah(request.clone()).await;
        let (second, _) = maker.generate_khutbah(request).await;

        let first = first.expect("first pdf");
        let second = second.expect("second pdf");
        assert_ne!(first, second, "same topic+language must not collide");
        assert!(first.exists() && second.exists());
        assert_eq!(model.call_count(), 2, "each call hits the model independently");
    }
}
