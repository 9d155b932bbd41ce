//! PDF stage — drives printpdf over the assembled HTML and owns output
//! filenames and document metadata.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use printpdf::{GeneratePdfOptions, PdfDocument};
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::params::Language;
use crate::render::html::build_document;
use crate::task::TaskId;

/// Fixed author and creator stamped into every document.
const DOCUMENT_AUTHOR: &str = "KhutbahMaker";
const DOCUMENT_CREATOR: &str = "KhutbahMaker";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\-]").expect("filename regex is valid"));

/// Renders cleaned khutbah markdown to a PDF under `output_dir` and returns
/// the absolute path.
///
/// The filename carries the task id, so two calls with the same topic and
/// language never overwrite each other.
pub fn render_khutbah_pdf(
    markdown: &str,
    topic: &str,
    language: Language,
    task_id: &TaskId,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let pdf_path = output_dir.join(khutbah_filename(topic, language, task_id));
    info!("[{task_id}] Generating khutbah PDF: {}", pdf_path.display());

    let parts = build_document(markdown, topic);

    let mut warnings = Vec::new();
    let mut doc = PdfDocument::from_html(
        &parts.html,
        &BTreeMap::new(), // images
        &BTreeMap::new(), // fonts
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| RenderError::Pdf(e.to_string()))?;

    if !warnings.is_empty() {
        warn!("[{task_id}] PDF layout produced {} warnings", warnings.len());
    }

    doc.metadata.info.document_title = parts.title;
    doc.metadata.info.subject = format!("Islamic Khutbah on {topic}");
    doc.metadata.info.author = DOCUMENT_AUTHOR.to_string();
    doc.metadata.info.creator = DOCUMENT_CREATOR.to_string();

    let mut save_warnings = Vec::new();
    let bytes = doc.save(&Default::default(), &mut save_warnings);
    if !save_warnings.is_empty() {
        warn!(
            "[{task_id}] PDF save produced {} warnings",
            save_warnings.len()
        );
    }
    std::fs::write(&pdf_path, bytes)?;

    Ok(pdf_path)
}

/// Filesystem-safe output name: sanitized topic, language suffix, task id.
/// Every character outside word characters and hyphens becomes an underscore.
pub fn khutbah_filename(topic: &str, language: Language, task_id: &TaskId) -> String {
    let clean_topic = UNSAFE_CHARS.replace_all(topic, "_");
    format!(
        "{clean_topic}_khutbah_{}_{task_id}.pdf",
        language.file_suffix()
    )
}
