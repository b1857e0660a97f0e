//! Boundary operations exposed to the request-handling layer
//!
//! Wires the content adapter, registry and orchestrator together. Errors
//! are returned unchanged for the transport to map onto status codes.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ingestion::ContentAdapter;
use crate::orchestrator::AnswerOrchestrator;
use crate::providers::ReasoningBackend;
use crate::registry::{parse_document_id, DocumentRegistry};
use crate::types::{
    AnswerResponse, CrossCheckResponse, DeleteResponse, DocumentDetail, DocumentListResponse,
    UploadResponse,
};

/// Document Q&A service
pub struct DocumentService {
    registry: Arc<DocumentRegistry>,
    adapter: ContentAdapter,
    orchestrator: AnswerOrchestrator,
}

impl DocumentService {
    /// Create a service with an empty registry
    pub fn new(adapter: ContentAdapter, backend: Arc<dyn ReasoningBackend>) -> Self {
        Self::with_registry(Arc::new(DocumentRegistry::new()), adapter, backend)
    }

    /// Create a service over an existing registry
    pub fn with_registry(
        registry: Arc<DocumentRegistry>,
        adapter: ContentAdapter,
        backend: Arc<dyn ReasoningBackend>,
    ) -> Self {
        let orchestrator = AnswerOrchestrator::new(Arc::clone(&registry), backend);
        Self {
            registry,
            adapter,
            orchestrator,
        }
    }

    pub fn registry(&self) -> &Arc<DocumentRegistry> {
        &self.registry
    }

    pub fn backend(&self) -> &Arc<dyn ReasoningBackend> {
        self.orchestrator.backend()
    }

    /// Normalize and store an upload. Either one document is stored or
    /// nothing is.
    ///
    /// PDF extraction is synchronous; async callers should run this on the
    /// blocking pool.
    pub fn upload(&self, data: &[u8], filename: &str, content_type: &str) -> Result<UploadResponse> {
        let new = self.adapter.normalize(data, filename, content_type)?;
        let kind = new.content.kind();
        let id = self.registry.add(new);

        tracing::info!(
            "Uploaded '{}' as {} ({} bytes, id {})",
            filename,
            kind.display_name(),
            data.len(),
            id
        );

        Ok(UploadResponse {
            id,
            filename: filename.to_string(),
            kind,
        })
    }

    pub fn list_documents(&self) -> DocumentListResponse {
        let documents = self.registry.list();
        DocumentListResponse {
            total_count: documents.len(),
            documents,
        }
    }

    pub fn get_document(&self, id: &str) -> Result<DocumentDetail> {
        let id = parse_document_id(id)?;
        self.registry.get(&id).map(|doc| DocumentDetail::from(doc.as_ref()))
    }

    /// Delete a document; unknown ids are reported, not rejected
    pub fn delete_document(&self, id: &str) -> DeleteResponse {
        let deleted = parse_document_id(id)
            .map(|uuid| self.registry.delete(&uuid))
            .unwrap_or(false);
        if deleted {
            tracing::info!("Deleted document {}", id);
        } else {
            tracing::debug!("Delete requested for unknown document {}", id);
        }

        DeleteResponse {
            deleted,
            document_id: id.to_string(),
        }
    }

    pub async fn ask_single(&self, id: &str, question: &str) -> Result<AnswerResponse> {
        validate_question(question)?;
        let id = parse_document_id(id)?;
        self.orchestrator.ask_single(&id, question).await
    }

    pub async fn ask_cross_check(
        &self,
        ids: &[String],
        question: &str,
    ) -> Result<CrossCheckResponse> {
        validate_question(question)?;
        self.orchestrator.ask_cross_check(ids, question).await
    }
}

fn validate_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(Error::invalid_input("Question must not be empty"));
    }
    Ok(())
}
