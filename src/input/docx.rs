//! Word document extraction: conversion engine boundary plus style mapping
//!
//! The conversion engine turns document bytes into raw text and a list of
//! advisory warnings. The production engine reads `word/document.xml` out of
//! the archive and applies a style map (headings, emphasis) so the extracted
//! text approximates the document's visual structure.

use crate::error::{Result, TextReaderError};
use crate::input::document::Document;
use crate::input::extractor::TextExtractor;
use log::{debug, warn};
use regex::Regex;
use std::io::Read;

/// Outcome of a document conversion: the raw text plus any non-fatal
/// warnings the engine wants surfaced.
#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    pub text: String,
    pub warnings: Vec<String>,
}

/// External document-conversion engine boundary.
pub trait DocxEngine: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<ConversionResult>;
}

pub struct DocxExtractor {
    engine: Box<dyn DocxEngine>,
}

impl DocxExtractor {
    pub fn new() -> Self {
        Self::with_engine(Box::new(StyleMappedEngine::new()))
    }

    pub fn with_engine(engine: Box<dyn DocxEngine>) -> Self {
        Self { engine }
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocxExtractor {
    async fn extract_text(&self, doc: &Document) -> Result<String> {
        debug!("extracting text from Word document '{}'", doc.name);
        let result = self.engine.convert(&doc.bytes)?;

        // Advisory only, extraction still succeeds
        for warning in &result.warnings {
            warn!("while extracting '{}': {}", doc.name, warning);
        }

        Ok(result.text.trim().to_string())
    }
}

/// Production conversion engine: unzips `word/document.xml` and walks its
/// paragraphs and runs with precompiled patterns.
pub struct StyleMappedEngine {
    paragraph: Regex,
    paragraph_style: Regex,
    run: Regex,
    run_style: Regex,
    text_run: Regex,
    tag: Regex,
}

/// Paragraph style names the engine knows how to map to text structure.
const STYLE_MAP: &[(&str, &str)] = &[
    ("Title", "# "),
    ("Heading1", "# "),
    ("Heading2", "## "),
    ("Heading3", "### "),
    ("Heading4", "#### "),
];

impl StyleMappedEngine {
    pub fn new() -> Self {
        Self {
            paragraph: Regex::new(r"(?s)<w:p[ >].*?</w:p>|<w:p/>").expect("Invalid paragraph regex"),
            paragraph_style: Regex::new(r#"<w:pStyle w:val="([^"]+)""#)
                .expect("Invalid paragraph style regex"),
            run: Regex::new(r"(?s)<w:r[ >].*?</w:r>").expect("Invalid run regex"),
            run_style: Regex::new(r#"<w:rStyle w:val="([^"]+)""#).expect("Invalid run style regex"),
            text_run: Regex::new(r"(?s)<w:t[^>]*>(.*?)</w:t>|<w:tab/>|<w:br/>")
                .expect("Invalid text run regex"),
            tag: Regex::new(r"<[^>]*>").expect("Invalid tag regex"),
        }
    }

    fn convert_xml(&self, xml: &str) -> ConversionResult {
        let mut lines = Vec::new();
        let mut warnings = Vec::new();

        for paragraph in self.paragraph.find_iter(xml) {
            let paragraph = paragraph.as_str();
            let mut line = String::new();

            if let Some(caps) = self.paragraph_style.captures(paragraph) {
                let style = &caps[1];
                match STYLE_MAP.iter().find(|(name, _)| *name == style) {
                    Some((_, prefix)) => line.push_str(prefix),
                    None => {
                        if !matches!(style, "Normal" | "ListParagraph") {
                            let message = format!("unrecognised paragraph style '{}'", style);
                            if !warnings.contains(&message) {
                                warnings.push(message);
                            }
                        }
                    }
                }
            }

            for run in self.run.find_iter(paragraph) {
                let run = run.as_str();
                let marker = match self.run_style.captures(run).map(|c| c[1].to_string()) {
                    Some(style) if style == "Strong" => "**",
                    Some(style) if style == "Emphasis" => "*",
                    _ => "",
                };
                let mut run_text = String::new();
                for piece in self.text_run.find_iter(run) {
                    match piece.as_str() {
                        "<w:tab/>" => run_text.push('\t'),
                        "<w:br/>" => run_text.push('\n'),
                        tagged => run_text.push_str(&self.unescape(tagged)),
                    }
                }
                if run_text.is_empty() {
                    continue;
                }
                line.push_str(marker);
                line.push_str(&run_text);
                line.push_str(marker);
            }

            lines.push(line);
        }

        ConversionResult {
            text: lines.join("\n"),
            warnings,
        }
    }

    fn unescape(&self, fragment: &str) -> String {
        let text = self.tag.replace_all(fragment, "");
        text.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
    }
}

impl Default for StyleMappedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxEngine for StyleMappedEngine {
    fn convert(&self, bytes: &[u8]) -> Result<ConversionResult> {
        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
            TextReaderError::Extraction(format!("failed to open Word document: {}", e))
        })?;
        let mut entry = archive.by_name("word/document.xml").map_err(|_| {
            TextReaderError::Extraction("document archive has no word/document.xml".to_string())
        })?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml).map_err(|e| {
            TextReaderError::Extraction(format!("unreadable document body: {}", e))
        })?;

        Ok(self.convert_xml(&xml))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::document::MediaType;
    use std::io::Write;
    use zip::write::FileOptions;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn paragraph(style: Option<&str>, text: &str) -> String {
        let style_tag = style
            .map(|s| format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>", s))
            .unwrap_or_default();
        format!(
            "<w:p >{}<w:r ><w:t>{}</w:t></w:r></w:p>",
            style_tag, text
        )
    }

    #[tokio::test]
    async fn test_docx_extraction_with_heading_styles() {
        let xml = format!(
            "<w:document>{}{}{}</w:document>",
            paragraph(Some("Heading1"), "Report"),
            paragraph(None, "Opening paragraph."),
            paragraph(Some("Heading2"), "Details"),
        );
        let doc = Document::new(docx_bytes(&xml), "report.docx", MediaType::WordDocument);

        let text = DocxExtractor::new().extract_text(&doc).await.unwrap();
        assert_eq!(text, "# Report\nOpening paragraph.\n## Details");
    }

    #[test]
    fn test_unknown_style_becomes_warning_not_failure() {
        let xml = format!(
            "<w:document>{}</w:document>",
            paragraph(Some("FancySidebar"), "Aside text"),
        );
        let result = StyleMappedEngine::new().convert(&docx_bytes(&xml)).unwrap();

        assert!(result.text.contains("Aside text"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("FancySidebar"));
    }

    #[test]
    fn test_entities_and_emphasis_runs() {
        let xml = "<w:document><w:p ><w:r ><w:rPr><w:rStyle w:val=\"Strong\"/></w:rPr>\
                   <w:t>Tom &amp; Jerry</w:t></w:r></w:p></w:document>";
        let result = StyleMappedEngine::new().convert(&docx_bytes(xml)).unwrap();
        assert_eq!(result.text, "**Tom & Jerry**");
    }

    #[tokio::test]
    async fn test_not_a_zip_reports_extraction_error() {
        let doc = Document::new(
            b"plainly not a zip archive".to_vec(),
            "broken.docx",
            MediaType::WordDocument,
        );
        let err = DocxExtractor::new().extract_text(&doc).await.unwrap_err();
        assert!(matches!(err, TextReaderError::Extraction(_)));
    }

    #[test]
    fn test_missing_document_xml() {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/other.xml", FileOptions::default())
                .unwrap();
            writer.write_all(b"<w:document/>").unwrap();
            writer.finish().unwrap();
        }
        let err = StyleMappedEngine::new()
            .convert(&buffer.into_inner())
            .unwrap_err();
        assert!(matches!(err, TextReaderError::Extraction(_)));
    }
}
