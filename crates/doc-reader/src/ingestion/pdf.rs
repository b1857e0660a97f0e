//! PDF text extraction
//!
//! The extractor is a seam: the adapter only needs per-page text and a
//! document-level failure signal.

use crate::error::{Error, Result};

/// Per-page PDF text extraction
pub trait PdfExtractor: Send + Sync {
    /// Extract text for every page in order.
    ///
    /// `Ok(None)` for a page means that page yielded no text. An `Err` means
    /// the document as a whole could not be read.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<Option<String>>>;
}

/// Extractor backed by `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<Option<String>>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::invalid_input(format!("Failed to process PDF: {}", e)))?;

        let pages = doc
            .get_pages()
            .into_keys()
            .map(|page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => {
                    let text = cleanup_pdf_text(&text);
                    (!text.is_empty()).then_some(text)
                }
                Err(e) => {
                    tracing::warn!("Could not extract text from PDF page {}: {}", page_number, e);
                    None
                }
            })
            .collect();

        Ok(pages)
    }
}

/// Normalize ligatures and spacing that PDF fonts commonly produce
pub fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{00A0}', " ") // Non-breaking space
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a PDF with one page per entry of `pages`, each showing that text
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extracts_each_page() {
        let data = build_pdf(&["Quarterly revenue", "Signed by Alice"]);
        let pages = LopdfExtractor.extract_pages(&data).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].as_deref().unwrap_or_default().contains("Quarterly revenue"));
        assert!(pages[1].as_deref().unwrap_or_default().contains("Signed by Alice"));
    }

    #[test]
    fn test_corrupt_pdf_is_invalid_input() {
        let result = LopdfExtractor.extract_pages(b"%PDF-1.4 this is not really a pdf");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_cleanup_pdf_text() {
        let cleaned = cleanup_pdf_text("\u{FB01}nal  \n\u{00A0}of\u{FB02}ow\0\n\n");
        assert_eq!(cleaned, "final\n offlow");
    }
}
