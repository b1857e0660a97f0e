//! Reasoning backend abstractions
//!
//! The orchestrator only sees the `ReasoningBackend` trait, so the remote
//! model (Gemini or a local Ollama) is chosen at startup from configuration.

pub mod backend;
pub mod gemini;
pub mod ollama;

use std::sync::Arc;

pub use backend::ReasoningBackend;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

use crate::config::{BackendProvider, DocReaderConfig};
use crate::error::Result;

/// Build the backend selected in configuration
pub fn build_backend(config: &DocReaderConfig) -> Result<Arc<dyn ReasoningBackend>> {
    let backend: Arc<dyn ReasoningBackend> = match config.backend.provider {
        BackendProvider::Gemini => Arc::new(GeminiClient::new(
            &config.gemini,
            config.backend.timeout_secs,
        )?),
        BackendProvider::Ollama => Arc::new(OllamaClient::new(
            &config.ollama,
            config.backend.timeout_secs,
        )?),
    };

    tracing::info!(
        "Reasoning backend: {} (model: {})",
        backend.name(),
        backend.model()
    );
    Ok(backend)
}
