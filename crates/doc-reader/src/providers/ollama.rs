//! Ollama client for answer generation on a local model

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::backend::ReasoningBackend;
use crate::config::OllamaConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::EncodedImage;

/// Ollama API client
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OllamaConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    /// Base64 images for multimodal models
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &OllamaConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn build_request(&self, prompt: String, images: Vec<String>) -> GenerateRequest {
        GenerateRequest {
            model: self.config.model.clone(),
            prompt,
            stream: false,
            images,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        }
    }

    async fn generate(&self, prompt: String, images: Vec<String>) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));
        let request = self.build_request(prompt, images);

        tracing::debug!("Generating answer with Ollama model: {}", self.config.model);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(generate_response.response.trim().to_string())
    }
}

#[async_trait]
impl ReasoningBackend for OllamaClient {
    async fn ask_text(&self, text: &str, question: &str) -> Result<String> {
        self.generate(PromptBuilder::build_text_prompt(text, question), Vec::new())
            .await
    }

    async fn ask_image(&self, question: &str, image: &EncodedImage) -> Result<String> {
        // Ollama infers the format from the bytes; the media type is not sent.
        self.generate(
            PromptBuilder::build_image_prompt(question),
            vec![image.data.clone()],
        )
        .await
    }

    async fn ask_composite(&self, prompt: &str) -> Result<String> {
        self.generate(prompt.to_string(), Vec::new()).await
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url.trim_end_matches('/'));

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
