//! Extractor adapter contract and the plain-text adapter

use crate::error::Result;
use crate::input::document::Document;

/// Uniform contract for the per-format extractor adapters. Each adapter
/// owns one extraction engine; the dispatcher selects exactly one per
/// document.
pub trait TextExtractor {
    fn extract_text(
        &self,
        doc: &Document,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract_text(&self, doc: &Document) -> Result<String> {
        // Lossy fallback matches browser readAsText behavior for files with
        // stray non-UTF-8 bytes.
        let text = match String::from_utf8(doc.bytes.clone()) {
            Ok(text) => text,
            Err(_) => String::from_utf8_lossy(&doc.bytes).into_owned(),
        };
        Ok(text)
    }
}
