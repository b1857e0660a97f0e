//! In-memory document registry
//!
//! Sole owner of uploaded content. Documents are handed out as
//! `Arc<Document>` so callers never hold a shard lock while waiting on
//! PDF extraction or the reasoning backend.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Document, DocumentSummary, NewDocument};

/// Parse a caller-supplied document id.
///
/// Ids are opaque to callers, so a string that is not a UUID names a
/// document that cannot exist and fails with `NotFound` carrying the
/// string as sent.
pub fn parse_document_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found(raw))
}

struct StoredDocument {
    /// Insertion sequence, used for stable listing order
    seq: u64,
    doc: Arc<Document>,
}

/// Registry of uploaded documents keyed by generated id
#[derive(Default)]
pub struct DocumentRegistry {
    documents: DashMap<Uuid, StoredDocument>,
    next_seq: AtomicU64,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under a fresh random id and return the id.
    ///
    /// Field consistency is the content adapter's job; nothing is validated here.
    pub fn add(&self, new: NewDocument) -> Uuid {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        loop {
            let id = Uuid::new_v4();
            // Vacancy check and insert happen under the same shard lock.
            match self.documents.entry(id) {
                Entry::Vacant(slot) => {
                    let doc = Arc::new(Document::from_new(id, new));
                    tracing::debug!("Registered document {} ({})", id, doc.filename);
                    slot.insert(StoredDocument { seq, doc });
                    return id;
                }
                Entry::Occupied(_) => {
                    tracing::warn!("Generated document id {} already in use, regenerating", id);
                }
            }
        }
    }

    /// Summaries of every stored document in insertion order
    pub fn list(&self) -> Vec<DocumentSummary> {
        let mut entries: Vec<(u64, DocumentSummary)> = self
            .documents
            .iter()
            .map(|entry| (entry.seq, DocumentSummary::from(entry.doc.as_ref())))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, summary)| summary).collect()
    }

    /// Full record for an id
    pub fn get(&self, id: &Uuid) -> Result<Arc<Document>> {
        self.documents
            .get(id)
            .map(|entry| Arc::clone(&entry.doc))
            .ok_or_else(|| Error::not_found(*id))
    }

    /// Text for an id; the placeholder for images
    pub fn get_text(&self, id: &Uuid) -> Result<String> {
        self.get(id).map(|doc| doc.text().to_string())
    }

    /// Texts for the ids that exist. Missing ids are silently omitted;
    /// callers compare the returned keys with what they asked for.
    pub fn get_many_texts(&self, ids: &[Uuid]) -> HashMap<Uuid, String> {
        ids.iter()
            .filter_map(|id| {
                self.documents
                    .get(id)
                    .map(|entry| (*id, entry.doc.text().to_string()))
            })
            .collect()
    }

    /// Remove a document; returns whether it existed
    pub fn delete(&self, id: &Uuid) -> bool {
        self.documents.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
