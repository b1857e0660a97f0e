//! doc-reader: document Q&A over uploaded text, PDFs and images
//!
//! Uploads are normalized by the content adapter and kept in an in-memory
//! registry. Questions about one document, or cross-checks over several,
//! are answered by a pluggable reasoning backend (Gemini or Ollama).

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod orchestrator;
pub mod providers;
pub mod registry;
pub mod server;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::DocReaderConfig;
pub use error::{Error, Result};
pub use orchestrator::AnswerOrchestrator;
pub use registry::DocumentRegistry;
pub use service::DocumentService;
pub use types::{Document, DocumentContent, DocumentKind, DocumentSummary};
