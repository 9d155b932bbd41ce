//! KhutbahMaker — generates Friday khutbah (sermon) documents from a topic prompt.
//!
//! Flow: build prompt → Gemini `generateContent` → strip markdown fences →
//! render styled PDF with table of contents and metadata → return path + text.
//!
//! The library never installs a logging subscriber and never reads environment
//! variables; the embedding application owns both. All failures collapse to a
//! `(None, None)` pair at the orchestration boundary — see
//! [`generation::generator::KhutbahMaker::generate_khutbah`].

pub mod config;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod render;
pub mod task;

pub use config::ModelConfig;
pub use errors::KhutbahError;
pub use generation::generator::{GeneratedKhutbah, KhutbahMaker};
pub use generation::params::{GenerationRequest, Language, Length, Tone};
pub use task::TaskId;
