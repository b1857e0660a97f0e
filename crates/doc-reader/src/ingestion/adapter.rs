//! Content adapter: turns raw upload bytes into document fields

use std::sync::Arc;

use super::image::{is_supported_image, SUPPORTED_IMAGE_TYPES};
use super::pdf::{LopdfExtractor, PdfExtractor};
use crate::error::{Error, Result};
use crate::types::{DocumentContent, NewDocument};

pub const TEXT_MEDIA_TYPE: &str = "text/plain";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Classifies uploads by declared content type
#[derive(Clone)]
pub struct ContentAdapter {
    pdf_extractor: Arc<dyn PdfExtractor>,
}

impl Default for ContentAdapter {
    fn default() -> Self {
        Self::new(Arc::new(LopdfExtractor))
    }
}

impl ContentAdapter {
    /// Create an adapter with a specific PDF extractor
    pub fn new(pdf_extractor: Arc<dyn PdfExtractor>) -> Self {
        Self { pdf_extractor }
    }

    /// Every content type an upload may declare
    pub fn accepted_types() -> Vec<String> {
        [TEXT_MEDIA_TYPE, PDF_MEDIA_TYPE]
            .iter()
            .chain(SUPPORTED_IMAGE_TYPES)
            .map(|t| t.to_string())
            .collect()
    }

    /// Normalize an upload.
    ///
    /// Fails with `UnsupportedType` for unknown content types and
    /// `InvalidInput` for PDFs that cannot be read at all. Nothing is stored
    /// here, so a failure never leaves a partial document behind.
    pub fn normalize(
        &self,
        data: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<NewDocument> {
        let media_type = media_type_essence(content_type);

        let content = match media_type.as_str() {
            TEXT_MEDIA_TYPE => DocumentContent::Text {
                text: String::from_utf8_lossy(data).into_owned(),
            },
            PDF_MEDIA_TYPE => self.normalize_pdf(data, filename)?,
            other if is_supported_image(other) => DocumentContent::Image {
                placeholder: format!("[Image: {}]", filename),
                data: data.to_vec(),
                media_type: content_type.trim().to_string(),
            },
            _ => {
                return Err(Error::UnsupportedType {
                    content_type: content_type.to_string(),
                    accepted: Self::accepted_types(),
                })
            }
        };

        tracing::debug!(
            "Normalized '{}' ({}) as {:?}",
            filename,
            media_type,
            content.kind()
        );

        Ok(NewDocument {
            filename: filename.to_string(),
            content,
            size_bytes: data.len() as u64,
        })
    }

    fn normalize_pdf(&self, data: &[u8], filename: &str) -> Result<DocumentContent> {
        let pages = self.pdf_extractor.extract_pages(data).map_err(|e| {
            tracing::warn!("PDF extraction failed for '{}': {}", filename, e);
            match e {
                Error::InvalidInput(_) => e,
                other => Error::invalid_input(format!("Failed to process PDF: {}", other)),
            }
        })?;

        let empty_pages = pages.iter().filter(|p| p.is_none()).count();
        if empty_pages > 0 {
            tracing::debug!(
                "'{}': {} of {} pages yielded no text",
                filename,
                empty_pages,
                pages.len()
            );
        }

        let page_count = pages.len() as u32;
        let text = pages
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(DocumentContent::Pdf { text, page_count })
    }
}

/// Lowercased media type without parameters (`text/plain; charset=utf-8` -> `text/plain`)
pub(crate) fn media_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
