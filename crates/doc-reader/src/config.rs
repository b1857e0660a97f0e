//! Configuration for the document Q&A service
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, environment variables, then CLI flags (applied by the binary).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocReaderConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Reasoning backend selection
    pub backend: BackendConfig,
    /// Gemini settings (used when backend = gemini)
    pub gemini: GeminiConfig,
    /// Ollama settings (used when backend = ollama)
    pub ollama: OllamaConfig,
}

impl DocReaderConfig {
    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("GOOGLE_API_KEY")) {
            if !key.trim().is_empty() {
                self.gemini.api_key = Some(key.trim().to_string());
            }
        }

        if let Some(provider) = lookup("DOC_READER_BACKEND") {
            self.backend.provider = match provider.trim().to_ascii_lowercase().as_str() {
                "gemini" => BackendProvider::Gemini,
                "ollama" => BackendProvider::Ollama,
                other => {
                    return Err(Error::Config(format!(
                        "Unknown backend '{}' (expected gemini or ollama)",
                        other
                    )))
                }
            };
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_size: 25 * 1024 * 1024, // 25MB
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

/// Backend provider selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Google Gemini API
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// Reasoning backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub provider: BackendProvider,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::Gemini,
            timeout_secs: 120,
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; usually supplied through GEMINI_API_KEY
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens in an answer
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.2,
            max_output_tokens: 2048,
        }
    }
}

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name; must be multimodal to answer image questions
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llava".to_string(),
            temperature: 0.3,
        }
    }
}
