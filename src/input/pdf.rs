//! PDF extraction: engine boundary plus line-structure reconstruction
//!
//! The rendering engine hands back a flat list of positioned text items per
//! page. `PdfExtractor` rebuilds visual line structure from that list: a new
//! line starts whenever the vertical position of consecutive items changes.

use crate::error::{Result, TextReaderError};
use crate::input::document::Document;
use crate::input::extractor::TextExtractor;
use log::debug;
use lopdf::content::Content;
use lopdf::Object;

/// One positioned text run from a PDF page, in content order.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Vertical position of the text baseline on the page.
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: usize,
    pub encrypted: bool,
}

/// An opened PDF document as exposed by a rendering engine.
pub trait PdfDocument: Send {
    fn page_count(&self) -> usize;

    /// Ordered text items for a page, zero-based index.
    fn page_items(&self, page: usize) -> Result<Vec<TextItem>>;

    fn metadata(&self) -> PdfMetadata;
}

/// External PDF rendering engine boundary: bytes in, opened document out.
pub trait PdfEngine: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>>;
}

pub struct PdfExtractor {
    engine: Box<dyn PdfEngine>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::with_engine(Box::new(LopdfEngine))
    }

    pub fn with_engine(engine: Box<dyn PdfEngine>) -> Self {
        Self { engine }
    }

    pub fn metadata(&self, doc: &Document) -> Result<PdfMetadata> {
        Ok(self.engine.open(&doc.bytes)?.metadata())
    }

    /// Concatenate one page's items, breaking the line at every vertical
    /// position change. A run of same-position items never gets a break.
    fn assemble_page(items: &[TextItem]) -> String {
        let mut page_text = String::new();
        let mut last_y: Option<f64> = None;

        for item in items {
            if let Some(prev) = last_y {
                if prev != item.y {
                    page_text.push('\n');
                }
            }
            page_text.push_str(&item.text);
            last_y = Some(item.y);
        }

        page_text
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract_text(&self, doc: &Document) -> Result<String> {
        let pdf = self.engine.open(&doc.bytes)?;
        let num_pages = pdf.page_count();
        debug!("extracting text from PDF '{}' ({} pages)", doc.name, num_pages);

        let mut full_text = String::new();
        for page in 0..num_pages {
            let items = pdf.page_items(page)?;
            full_text.push_str(&Self::assemble_page(&items));
            // Blank-line separator between pages
            full_text.push_str("\n\n");
        }

        Ok(full_text.trim().to_string())
    }
}

/// Production engine backed by lopdf. Walks each page's content stream and
/// tracks the text-positioning operators to recover a y coordinate per shown
/// string.
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| TextReaderError::Extraction(format!("failed to open PDF: {}", e)))?;
        let pages: Vec<lopdf::ObjectId> = doc.get_pages().into_values().collect();
        Ok(Box::new(LopdfDocument { doc, pages }))
    }
}

struct LopdfDocument {
    doc: lopdf::Document,
    pages: Vec<lopdf::ObjectId>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_items(&self, page: usize) -> Result<Vec<TextItem>> {
        // Metadata of an encrypted document stays readable; its content
        // streams do not.
        if self.doc.is_encrypted() {
            return Err(TextReaderError::Extraction(
                "document is encrypted".to_string(),
            ));
        }
        let page_id = *self.pages.get(page).ok_or_else(|| {
            TextReaderError::Extraction(format!("page {} out of range", page + 1))
        })?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| TextReaderError::Extraction(format!("unreadable page content: {}", e)))?;
        let content = Content::decode(&content)
            .map_err(|e| TextReaderError::Extraction(format!("corrupt content stream: {}", e)))?;

        let mut items = Vec::new();
        let mut y = 0.0_f64;
        let mut leading = 0.0_f64;

        for op in &content.operations {
            match op.operator.as_str() {
                // Begin text object: text matrix resets to identity
                "BT" => y = 0.0,
                "Tm" => {
                    if let Some(ty) = op.operands.get(5).and_then(number) {
                        y = ty;
                    }
                }
                "Td" => {
                    if let Some(ty) = op.operands.get(1).and_then(number) {
                        y += ty;
                    }
                }
                "TD" => {
                    if let Some(ty) = op.operands.get(1).and_then(number) {
                        leading = -ty;
                        y += ty;
                    }
                }
                "TL" => {
                    if let Some(l) = op.operands.first().and_then(number) {
                        leading = l;
                    }
                }
                "T*" => y -= leading,
                "Tj" => {
                    if let Some(text) = op.operands.first().and_then(shown_string) {
                        items.push(TextItem { text, y });
                    }
                }
                "'" => {
                    y -= leading;
                    if let Some(text) = op.operands.first().and_then(shown_string) {
                        items.push(TextItem { text, y });
                    }
                }
                "\"" => {
                    y -= leading;
                    if let Some(text) = op.operands.get(2).and_then(shown_string) {
                        items.push(TextItem { text, y });
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(parts)) = op.operands.first() {
                        let mut text = String::new();
                        for part in parts {
                            if let Some(s) = shown_string(part) {
                                text.push_str(&s);
                            }
                        }
                        if !text.is_empty() {
                            items.push(TextItem { text, y });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(items)
    }

    fn metadata(&self) -> PdfMetadata {
        PdfMetadata {
            title: self.info_string(b"Title"),
            author: self.info_string(b"Author"),
            page_count: self.pages.len(),
            encrypted: self.doc.is_encrypted(),
        }
    }
}

impl LopdfDocument {
    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_dict().ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match dict.get(key).ok()? {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        }
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn shown_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// Decode a PDF string object: UTF-16BE when BOM-prefixed, otherwise treat
/// each byte as a Latin-1 code point. Full font-encoding support is the
/// engine's concern, not this reader's.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
