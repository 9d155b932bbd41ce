use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Top-level error type for khutbah generation.
///
/// Stage errors are kept as distinct variants so callers of
/// [`crate::KhutbahMaker::try_generate`] can tell failure causes apart
/// without parsing log output. The public tuple API collapses all of these
/// to `(None, None)` after logging.
#[derive(Debug, Error)]
pub enum KhutbahError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
