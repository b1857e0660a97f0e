//! Reasoning backend trait

use async_trait::async_trait;

use crate::error::Result;
use crate::ingestion::EncodedImage;

/// Capabilities the answer orchestrator needs from a language model.
///
/// Implementations:
/// - `GeminiClient`: Google Gemini API
/// - `OllamaClient`: local Ollama server
///
/// Calls are not retried; a failure surfaces to the caller unchanged.
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Answer a question about a piece of text
    async fn ask_text(&self, text: &str, question: &str) -> Result<String>;

    /// Answer a question about an inline image
    async fn ask_image(&self, question: &str, image: &EncodedImage) -> Result<String>;

    /// Answer a fully assembled prompt
    async fn ask_composite(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is configured and reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
