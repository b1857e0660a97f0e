//! Request bodies for question endpoints

use serde::{Deserialize, Serialize};

/// Question about a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// Natural-language question
    pub question: String,
}

/// Question answered jointly over several documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossCheckRequest {
    /// Natural-language question
    pub question: String,
    /// Documents to compare (2 to 5, distinct); ids are taken as sent
    pub document_ids: Vec<String>,
}
