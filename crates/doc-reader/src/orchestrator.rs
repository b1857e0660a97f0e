//! Answer orchestration: route questions to the right backend capability
//!
//! Documents are fetched from the registry as `Arc` handles before any
//! backend call, so no registry lock is held while the backend works.

use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::encode_image;
use crate::providers::ReasoningBackend;
use crate::registry::{parse_document_id, DocumentRegistry};
use crate::types::{AnswerResponse, CrossCheckResponse, DocumentContent};

/// Minimum number of documents in a cross-check
pub const MIN_CROSS_CHECK_DOCUMENTS: usize = 2;
/// Maximum number of documents in a cross-check
pub const MAX_CROSS_CHECK_DOCUMENTS: usize = 5;

/// Builds backend requests from stored documents
pub struct AnswerOrchestrator {
    registry: Arc<DocumentRegistry>,
    backend: Arc<dyn ReasoningBackend>,
}

impl AnswerOrchestrator {
    pub fn new(registry: Arc<DocumentRegistry>, backend: Arc<dyn ReasoningBackend>) -> Self {
        Self { registry, backend }
    }

    /// Get the reasoning backend
    pub fn backend(&self) -> &Arc<dyn ReasoningBackend> {
        &self.backend
    }

    /// Answer a question about one document.
    ///
    /// Images go to the image capability with their encoded payload; text
    /// and PDF documents go to the text capability with their stored text.
    pub async fn ask_single(&self, id: &Uuid, question: &str) -> Result<AnswerResponse> {
        let document = self.registry.get(id)?;

        let answer = match &document.content {
            DocumentContent::Image {
                data, media_type, ..
            } => {
                tracing::debug!("Routing question on {} to image capability", id);
                let image = encode_image(data, media_type);
                self.backend.ask_image(question, &image).await?
            }
            DocumentContent::Text { text } | DocumentContent::Pdf { text, .. } => {
                tracing::debug!("Routing question on {} to text capability", id);
                self.backend.ask_text(text, question).await?
            }
        };

        tracing::info!(
            "Answered question on '{}' via {} ({} chars)",
            document.filename,
            self.backend.name(),
            answer.len()
        );

        Ok(AnswerResponse {
            answer,
            document_id: document.id,
            filename: document.filename.clone(),
        })
    }

    /// Answer one question jointly over 2 to 5 distinct documents with a
    /// single backend call. Fails without calling the backend if any id is
    /// missing; the error names the missing ids exactly as requested.
    pub async fn ask_cross_check(
        &self,
        ids: &[String],
        question: &str,
    ) -> Result<CrossCheckResponse> {
        if !(MIN_CROSS_CHECK_DOCUMENTS..=MAX_CROSS_CHECK_DOCUMENTS).contains(&ids.len()) {
            return Err(Error::invalid_input(format!(
                "Cross-check requires between {} and {} documents, got {}",
                MIN_CROSS_CHECK_DOCUMENTS,
                MAX_CROSS_CHECK_DOCUMENTS,
                ids.len()
            )));
        }

        let resolved: Vec<(&str, Option<Uuid>)> = ids
            .iter()
            .map(|raw| (raw.as_str(), parse_document_id(raw).ok()))
            .collect();

        let mut seen = HashSet::with_capacity(resolved.len());
        if let Some((duplicate, _)) = resolved
            .iter()
            .find(|(raw, id)| !seen.insert(id.ok_or(*raw)))
        {
            return Err(Error::invalid_input(format!(
                "Document {} is listed more than once",
                duplicate
            )));
        }

        let uuids: Vec<Uuid> = resolved.iter().filter_map(|(_, id)| *id).collect();
        let texts = self.registry.get_many_texts(&uuids);
        let missing: Vec<String> = resolved
            .iter()
            .filter(|(_, id)| !id.is_some_and(|id| texts.contains_key(&id)))
            .map(|(raw, _)| raw.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::NotFound { ids: missing });
        }

        let documents: Vec<(Uuid, &str)> = uuids
            .iter()
            .filter_map(|id| texts.get(id).map(|text| (*id, text.as_str())))
            .collect();
        let prompt = PromptBuilder::build_cross_check_prompt(&documents, question);

        let answer = self.backend.ask_composite(&prompt).await?;

        tracing::info!(
            "Cross-checked {} documents via {} ({} prompt chars)",
            documents.len(),
            self.backend.name(),
            prompt.len()
        );

        Ok(CrossCheckResponse {
            answer,
            document_ids: uuids,
            documents_analyzed: documents.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::ContentAdapter;
    use crate::testing::{BackendCall, RecordingBackend};

    struct Fixture {
        registry: Arc<DocumentRegistry>,
        backend: Arc<RecordingBackend>,
        orchestrator: AnswerOrchestrator,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(DocumentRegistry::new());
        let backend = Arc::new(RecordingBackend::default());
        let orchestrator = AnswerOrchestrator::new(Arc::clone(&registry), backend.clone());
        Fixture {
            registry,
            backend,
            orchestrator,
        }
    }

    fn id_strings(ids: &[Uuid]) -> Vec<String> {
        ids.iter().map(Uuid::to_string).collect()
    }

    fn upload(registry: &DocumentRegistry, data: &[u8], filename: &str, content_type: &str) -> Uuid {
        let new = ContentAdapter::default()
            .normalize(data, filename, content_type)
            .unwrap();
        registry.add(new)
    }

    #[tokio::test]
    async fn test_text_question_routes_stored_text() {
        let f = fixture();
        let id = upload(&f.registry, b"hello world", "hello.txt", "text/plain");

        let response = f.orchestrator.ask_single(&id, "what does it say?").await.unwrap();

        assert!(response.answer.contains("hello world"));
        assert_eq!(response.document_id, id);
        assert_eq!(response.filename, "hello.txt");
        assert_eq!(
            f.backend.calls(),
            vec![BackendCall::Text {
                text: "hello world".to_string(),
                question: "what does it say?".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_image_question_routes_encoded_image() {
        let f = fixture();
        let id = upload(&f.registry, b"\x89PNG fake", "chart.png", "image/png");

        let doc = f.registry.get(&id).unwrap();
        let (payload, media_type) = doc.content.image().unwrap();
        assert!(!payload.is_empty());
        assert_eq!(media_type, "image/png");

        f.orchestrator.ask_single(&id, "what is plotted?").await.unwrap();

        let calls = f.backend.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            BackendCall::Image { question, image } => {
                assert_eq!(question, "what is plotted?");
                assert_eq!(image, &encode_image(b"\x89PNG fake", "image/png"));
            }
            other => panic!("expected image call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_image_question_sends_bare_media_type() {
        let f = fixture();
        let id = upload(&f.registry, b"\x89PNG fake", "chart.png", "image/png; foo=bar");

        let doc = f.registry.get(&id).unwrap();
        assert_eq!(doc.content.image().unwrap().1, "image/png; foo=bar");

        f.orchestrator.ask_single(&id, "what is plotted?").await.unwrap();
        match &f.backend.calls()[0] {
            BackendCall::Image { image, .. } => assert_eq!(image.mime_type, "image/png"),
            other => panic!("expected image call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_on_missing_or_deleted_is_not_found() {
        let f = fixture();
        let id = upload(&f.registry, b"temp", "t.txt", "text/plain");
        assert!(f.registry.delete(&id));

        let deleted = f.orchestrator.ask_single(&id, "?").await;
        assert!(matches!(deleted, Err(Error::NotFound { .. })));

        let never = f.orchestrator.ask_single(&Uuid::new_v4(), "?").await;
        assert!(matches!(never, Err(Error::NotFound { .. })));
        assert!(f.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_check_count_bounds() {
        let f = fixture();
        let ids: Vec<Uuid> = (0..6)
            .map(|i| upload(&f.registry, format!("doc {}", i).as_bytes(), "d.txt", "text/plain"))
            .collect();

        let ids = id_strings(&ids);

        let one = f.orchestrator.ask_cross_check(&ids[..1], "compare").await;
        assert!(matches!(one, Err(Error::InvalidInput(_))));

        let six = f.orchestrator.ask_cross_check(&ids, "compare").await;
        assert!(matches!(six, Err(Error::InvalidInput(_))));

        let five = f.orchestrator.ask_cross_check(&ids[..5], "compare").await.unwrap();
        assert_eq!(five.documents_analyzed, 5);
    }

    #[tokio::test]
    async fn test_cross_check_names_exactly_missing_ids() {
        let f = fixture();
        let a = upload(&f.registry, b"A", "a.txt", "text/plain");
        let b = upload(&f.registry, b"B", "b.txt", "text/plain");
        let missing = Uuid::new_v4();

        let result = f
            .orchestrator
            .ask_cross_check(&id_strings(&[a, missing, b]), "compare")
            .await;
        match result {
            Err(Error::NotFound { ids }) => assert_eq!(ids, vec![missing.to_string()]),
            other => panic!("expected NotFound, got {:?}", other.map(|r| r.answer)),
        }
        assert!(f.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_check_reports_unparseable_ids_as_missing() {
        let f = fixture();
        let a = upload(&f.registry, b"A", "a.txt", "text/plain");
        let b = upload(&f.registry, b"B", "b.txt", "text/plain");
        let ids = vec![a.to_string(), "doc-123".to_string(), b.to_string()];

        match f.orchestrator.ask_cross_check(&ids, "compare").await {
            Err(Error::NotFound { ids }) => assert_eq!(ids, vec!["doc-123".to_string()]),
            other => panic!("expected NotFound, got {:?}", other.map(|r| r.answer)),
        }
        assert!(f.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_check_rejects_duplicates() {
        let f = fixture();
        let a = upload(&f.registry, b"A", "a.txt", "text/plain");

        let result = f
            .orchestrator
            .ask_cross_check(&id_strings(&[a, a]), "compare")
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let spelled_twice = vec![a.to_string(), a.to_string().to_uppercase()];
        let result = f.orchestrator.ask_cross_check(&spelled_twice, "compare").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cross_check_single_composite_call() {
        let f = fixture();
        let a = upload(&f.registry, b"A", "a.txt", "text/plain");
        let b = upload(&f.registry, b"B", "b.txt", "text/plain");

        let response = f
            .orchestrator
            .ask_cross_check(&id_strings(&[a, b]), "compare them")
            .await
            .unwrap();
        assert_eq!(response.document_ids, vec![a, b]);
        assert_eq!(response.documents_analyzed, 2);

        let calls = f.backend.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            BackendCall::Composite { prompt } => {
                assert!(prompt.contains(&a.to_string()));
                assert!(prompt.contains(&b.to_string()));
                assert!(prompt.contains("\nA\n"));
                assert!(prompt.contains("\nB\n"));
                assert!(prompt.contains("compare them"));
            }
            other => panic!("expected composite call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let registry = Arc::new(DocumentRegistry::new());
        let orchestrator = AnswerOrchestrator::new(
            Arc::clone(&registry),
            Arc::new(RecordingBackend::unavailable()),
        );
        let id = upload(&registry, b"text", "t.txt", "text/plain");

        let result = orchestrator.ask_single(&id, "?").await;
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}
