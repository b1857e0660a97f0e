//! Document types held by the registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How questions about a document are answered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Plain text upload
    Text,
    /// Text extracted from a PDF
    Pdf,
    /// Image sent to the backend as an inline attachment
    Image,
}

impl DocumentKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text File",
            Self::Pdf => "PDF",
            Self::Image => "Image",
        }
    }
}

/// Normalized content of an upload.
///
/// Image payload and media type only exist on the `Image` variant, so a
/// text or PDF document can never carry binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    /// Decoded plain text
    Text { text: String },
    /// Extracted PDF text, pages joined with newlines
    Pdf { text: String, page_count: u32 },
    /// Raw image bytes plus a display placeholder
    Image {
        placeholder: String,
        data: Vec<u8>,
        media_type: String,
    },
}

impl DocumentContent {
    /// Kind derived from the variant
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Text { .. } => DocumentKind::Text,
            Self::Pdf { .. } => DocumentKind::Pdf,
            Self::Image { .. } => DocumentKind::Image,
        }
    }

    /// Textual content; the placeholder for images
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Pdf { text, .. } => text,
            Self::Image { placeholder, .. } => placeholder,
        }
    }

    /// Raw bytes and media type, present only for images
    pub fn image(&self) -> Option<(&[u8], &str)> {
        match self {
            Self::Image {
                data, media_type, ..
            } => Some((data.as_slice(), media_type.as_str())),
            _ => None,
        }
    }
}

/// Fields produced by the content adapter, ready to be stored
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Caller-supplied display name
    pub filename: String,
    /// Normalized content
    pub content: DocumentContent,
    /// Size of the original upload in bytes
    pub size_bytes: u64,
}

/// A stored document
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Filename as uploaded
    pub filename: String,
    /// Normalized content
    pub content: DocumentContent,
    /// Size of the original upload in bytes
    pub size_bytes: u64,
    /// Upload timestamp
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Build a stored document from adapter output
    pub fn from_new(id: Uuid, new: NewDocument) -> Self {
        Self {
            id,
            filename: new.filename,
            content: new.content,
            size_bytes: new.size_bytes,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.content.kind()
    }

    pub fn text(&self) -> &str {
        self.content.text()
    }
}

/// Listing entry; never carries text or payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub kind: DocumentKind,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            kind: doc.kind(),
            created_at: doc.created_at,
        }
    }
}

/// Document details for a single-document lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub id: Uuid,
    pub filename: String,
    pub kind: DocumentKind,
    pub created_at: DateTime<Utc>,
    /// Size of the original upload in bytes
    pub size_bytes: u64,
    /// Characters of question-able text (placeholder length for images)
    pub char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl From<&Document> for DocumentDetail {
    fn from(doc: &Document) -> Self {
        let page_count = match &doc.content {
            DocumentContent::Pdf { page_count, .. } => Some(*page_count),
            _ => None,
        };

        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            kind: doc.kind(),
            created_at: doc.created_at,
            size_bytes: doc.size_bytes,
            char_count: doc.text().chars().count(),
            page_count,
            media_type: doc.content.image().map(|(_, media_type)| media_type.to_string()),
        }
    }
}
