//! Markdown → HTML assembly: title guarantee, table of contents, stylesheet.

use pulldown_cmark::{html::push_html, Event, HeadingLevel, Options, Parser, Tag};

use crate::render::styles::KHUTBAH_CSS;

/// Deepest heading level included in the table of contents.
const TOC_DEPTH: usize = 3;

/// The assembled HTML document plus the title it was assembled under.
#[derive(Debug, Clone)]
pub struct DocumentParts {
    pub title: String,
    pub html: String,
}

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: usize,
    pub text: String,
}

/// Builds the full HTML document for a cleaned khutbah markdown string.
///
/// Guarantees the document begins with a top-level heading: when the markdown
/// does not already start with one, a `Khutbah on {topic}` title is
/// synthesized and prepended. The returned title is always well-defined — it
/// is either the text of the existing first heading or the synthesized form.
pub fn build_document(markdown: &str, topic: &str) -> DocumentParts {
    let (title, titled_markdown) = ensure_title(markdown, topic);

    let toc = collect_headings(&titled_markdown);
    let body = markdown_to_html(&titled_markdown);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>");
    html.push_str(KHUTBAH_CSS);
    html.push_str("</style></head><body>");
    html.push_str(&toc_html(&toc));
    html.push_str(&body);
    html.push_str("</body></html>");

    DocumentParts { title, html }
}

/// Ensures the markdown starts with a `# ` heading and returns the document
/// title alongside the (possibly retitled) markdown.
pub fn ensure_title(markdown: &str, topic: &str) -> (String, String) {
    if let Some(first_line) = markdown.lines().next() {
        if let Some(existing) = first_line.strip_prefix("# ") {
            return (existing.trim().to_string(), markdown.to_string());
        }
    }
    let title = format!("Khutbah on {topic}");
    let titled = format!("# {title}\n\n{markdown}");
    (title, titled)
}

/// Collects headings down to [`TOC_DEPTH`]. Fenced code blocks are handled by
/// the markdown parser, so a `# line` inside one never becomes an entry.
pub fn collect_headings(markdown: &str) -> Vec<TocEntry> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut entries = Vec::new();
    let mut current: Option<TocEntry> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading(level, _, _)) => {
                let level = heading_depth(level);
                if level <= TOC_DEPTH {
                    current = Some(TocEntry {
                        level,
                        text: String::new(),
                    });
                }
            }
            // Inline HTML-looking segments in a heading arrive as Html events;
            // they belong in the entry text and get escaped in toc_html.
            Event::Text(text) | Event::Code(text) | Event::Html(text) => {
                if let Some(entry) = current.as_mut() {
                    entry.text.push_str(&text);
                }
            }
            Event::End(Tag::Heading(..)) => {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
            }
            _ => {}
        }
    }

    entries
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn toc_html(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"toc\">");
    for entry in entries {
        html.push_str(&format!(
            "<li class=\"toc-{}\">{}</li>",
            entry.level,
            escape_html(&entry.text)
        ));
    }
    html.push_str("</ul>");
    html
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut html = String::new();
    push_html(&mut html, parser);
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
