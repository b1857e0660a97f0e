//! Gemini client for answer generation via the Generative Language API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::backend::ReasoningBackend;
use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::EncodedImage;

/// Gemini API client.
///
/// A missing API key does not prevent construction; every call fails with
/// `BackendUnavailable` until a key is configured.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; questions will fail until it is configured");
        }

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::backend_unavailable("GEMINI_API_KEY environment variable is not set"))
    }

    fn build_request(&self, parts: Vec<Part>) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String> {
        let api_key = self.api_key()?;
        let request = self.build_request(parts);

        tracing::debug!("Calling Gemini model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("Gemini generation failed ({}): {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED
                | StatusCode::FORBIDDEN
                | StatusCode::TOO_MANY_REQUESTS
                | StatusCode::SERVICE_UNAVAILABLE => Error::BackendUnavailable(message),
                _ => Error::Backend(message),
            });
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("Failed to parse Gemini response: {}", e)))?;

        extract_answer(gen_response)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_answer(response: GenerateResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(Error::backend("No text in Gemini response"));
    }
    Ok(text.to_string())
}

#[async_trait]
impl ReasoningBackend for GeminiClient {
    async fn ask_text(&self, text: &str, question: &str) -> Result<String> {
        let prompt = PromptBuilder::build_text_prompt(text, question);
        self.generate(vec![Part::Text { text: prompt }]).await
    }

    async fn ask_image(&self, question: &str, image: &EncodedImage) -> Result<String> {
        self.generate(vec![
            Part::Text {
                text: PromptBuilder::build_image_prompt(question),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            },
        ])
        .await
    }

    async fn ask_composite(&self, prompt: &str) -> Result<String> {
        self.generate(vec![Part::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.api_key.is_some())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> GeminiClient {
        let config = GeminiConfig {
            api_key: api_key.map(str::to_string),
            ..GeminiConfig::default()
        };
        GeminiClient::new(&config, 5).unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client(None).endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_image_request_shape() {
        let request = client(Some("k")).build_request(vec![
            Part::Text {
                text: "what is this?".to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/png".to_string(),
                    data: "aGVsbG8=".to_string(),
                },
            },
        ]);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "what is this?");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "aGVsbG8=");
        assert!(json["generationConfig"]["maxOutputTokens"].is_number());
    }

    #[test]
    fn test_extract_answer_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"The total "},{"text":"is 42.\n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(response).unwrap(), "The total is 42.");
    }

    #[test]
    fn test_extract_answer_empty_is_backend_error() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(extract_answer(response), Err(Error::Backend(_))));
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let gemini = client(None);
        assert!(!gemini.health_check().await.unwrap());

        let result = gemini.ask_text("hello", "what?").await;
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}
