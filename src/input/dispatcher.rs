//! Format dispatch: route a document to the one extractor for its media type

use crate::error::{Result, TextReaderError};
use crate::input::document::{Document, MediaType};
use crate::input::docx::DocxExtractor;
use crate::input::extractor::{PlainTextExtractor, TextExtractor};
use crate::input::pdf::{PdfExtractor, PdfMetadata};
use log::info;

pub struct Dispatcher {
    text_extractor: PlainTextExtractor,
    pdf_extractor: PdfExtractor,
    docx_extractor: DocxExtractor,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            text_extractor: PlainTextExtractor,
            pdf_extractor: PdfExtractor::new(),
            docx_extractor: DocxExtractor::new(),
        }
    }

    /// Extract text from a document through the adapter matching its
    /// declared media type. The result is trimmed and guaranteed non-empty.
    pub async fn extract(&self, doc: &Document) -> Result<String> {
        let text = match doc.media_type {
            MediaType::PlainText => {
                info!("reading plain text: {}", doc.name);
                self.text_extractor.extract_text(doc).await?
            }
            MediaType::Pdf => {
                info!("extracting text from PDF: {}", doc.name);
                self.pdf_extractor.extract_text(doc).await?
            }
            MediaType::WordDocument => {
                info!("extracting text from Word document: {}", doc.name);
                self.docx_extractor.extract_text(doc).await?
            }
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(TextReaderError::EmptyDocument);
        }
        Ok(text)
    }

    /// Document metadata where the format supports it (currently PDF only).
    pub fn metadata(&self, doc: &Document) -> Result<Option<PdfMetadata>> {
        match doc.media_type {
            MediaType::Pdf => Ok(Some(self.pdf_extractor.metadata(doc)?)),
            _ => Ok(None),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
