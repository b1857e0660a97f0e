//! Response bodies for the HTTP boundary

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentKind, DocumentSummary};

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub kind: DocumentKind,
}

/// Document list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub total_count: usize,
}

/// Result of a delete request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether a document existed and was removed
    pub deleted: bool,
    /// Id as requested
    pub document_id: String,
}

/// Answer about a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub document_id: Uuid,
    pub filename: String,
}

/// Answer over several documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossCheckResponse {
    pub answer: String,
    pub document_ids: Vec<Uuid>,
    /// Number of document texts included in the prompt
    pub documents_analyzed: usize,
}
