//! Deterministic reasoning backend for tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::ingestion::EncodedImage;
use crate::providers::ReasoningBackend;

/// A backend call as observed by `RecordingBackend`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Text { text: String, question: String },
    Image { question: String, image: EncodedImage },
    Composite { prompt: String },
}

/// Echoes its input and records every call
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<BackendCall>>,
    unavailable: bool,
}

impl RecordingBackend {
    /// Backend that fails every call with `BackendUnavailable`
    pub fn unavailable() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        if self.unavailable {
            return Err(Error::backend_unavailable("test backend offline"));
        }
        self.calls.lock().push(call);
        Ok(())
    }
}

#[async_trait]
impl ReasoningBackend for RecordingBackend {
    async fn ask_text(&self, text: &str, question: &str) -> Result<String> {
        self.record(BackendCall::Text {
            text: text.to_string(),
            question: question.to_string(),
        })?;
        Ok(format!("text answer: {}", text))
    }

    async fn ask_image(&self, question: &str, image: &EncodedImage) -> Result<String> {
        self.record(BackendCall::Image {
            question: question.to_string(),
            image: image.clone(),
        })?;
        Ok(format!("image answer: {}", image.mime_type))
    }

    async fn ask_composite(&self, prompt: &str) -> Result<String> {
        self.record(BackendCall::Composite {
            prompt: prompt.to_string(),
        })?;
        Ok(format!("composite answer ({} chars)", prompt.len()))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.unavailable)
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "echo"
    }
}
