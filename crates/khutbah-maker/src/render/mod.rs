//! Document rendering — cleaned markdown in, styled PDF on disk out.
//!
//! Split like the export pipeline it feeds: `html` builds the titled,
//! TOC-prefixed HTML document, `styles` holds the fixed stylesheet, and
//! `pdf` drives printpdf and owns filenames and metadata.

pub mod html;
pub mod pdf;
pub mod styles;

pub use html::{build_document, DocumentParts};
pub use pdf::{render_khutbah_pdf, RenderError};
