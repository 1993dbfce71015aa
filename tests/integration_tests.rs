//! Integration tests for the text reader

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::io::Write;
use text_reader::analysis::SentimentLabel;
use text_reader::config::{Config, OutputFormat};
use text_reader::input::{Document, MediaType};
use text_reader::speech::espeak::EspeakEngine;
use text_reader::{ReaderSession, TextReaderError};

fn session() -> ReaderSession {
    let mut config = Config::default();
    config.embedding.enabled = false;
    ReaderSession::with_engines(config, None, Box::new(EspeakEngine::new()))
}

/// Two-line single-page PDF: items on one baseline, then a Td move down.
fn sample_pdf_bytes() -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    50.into(),
                    700.into(),
                ],
            ),
            Operation::new("Tj", vec![Object::string_literal("A good ")]),
            Operation::new("Tj", vec![Object::string_literal("first line.")]),
            Operation::new("Td", vec![0.into(), (-20).into()]),
            Operation::new("Tj", vec![Object::string_literal("A second line!")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

fn sample_docx_bytes() -> Vec<u8> {
    let xml = "<w:document>\
               <w:p ><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr>\
               <w:r ><w:t>Trip Notes</w:t></w:r></w:p>\
               <w:p ><w:r ><w:t>The beaches were beautiful. The food was excellent!</w:t></w:r></w:p>\
               </w:document>";
    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

#[tokio::test]
async fn test_analyze_plain_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "What a wonderful, beautiful day. The cat sat on the mat!").unwrap();

    let doc = Document::from_path(&path, None).await.unwrap();
    assert_eq!(doc.media_type, MediaType::PlainText);

    let (text, result) = session().analyze_document(&doc).await.unwrap();
    assert!(text.starts_with("What a wonderful"));
    assert_eq!(result.sentiment.label, SentimentLabel::VeryPositive);
    assert_eq!(result.statistics.sentence_count, 2);
    assert!(result.key_phrases.iter().any(|p| p.word == "wonderful,"));
}

#[tokio::test]
async fn test_unsupported_extension_rejected_without_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.xyz");
    std::fs::write(&path, b"not text").unwrap();

    let err = Document::from_path(&path, None).await.unwrap_err();
    assert!(matches!(err, TextReaderError::UnsupportedType(_)));
}

#[tokio::test]
async fn test_declared_type_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, "hello from a mislabeled file").unwrap();

    let doc = Document::from_path(&path, Some("text/plain")).await.unwrap();
    assert_eq!(doc.media_type, MediaType::PlainText);

    let text = session().extract_document(&doc).await.unwrap();
    assert_eq!(text, "hello from a mislabeled file");
}

#[tokio::test]
async fn test_pdf_extraction_reconstructs_lines() {
    let doc = Document::new(sample_pdf_bytes(), "sample.pdf", MediaType::Pdf);
    let (text, result) = session().analyze_document(&doc).await.unwrap();

    assert_eq!(text, "A good first line.\nA second line!");
    assert_eq!(result.statistics.sentence_count, 2);
    assert_eq!(result.sentiment.label, SentimentLabel::VeryPositive);
}

#[tokio::test]
async fn test_docx_extraction_and_analysis() {
    let doc = Document::new(sample_docx_bytes(), "trip.docx", MediaType::WordDocument);
    let (text, result) = session().analyze_document(&doc).await.unwrap();

    assert!(text.starts_with("# Trip Notes"));
    assert!(text.contains("beaches were beautiful"));
    assert_eq!(result.sentiment.label, SentimentLabel::VeryPositive);
}

#[tokio::test]
async fn test_empty_document_rejected() {
    let doc = Document::new(b"   \n ".to_vec(), "empty.txt", MediaType::PlainText);
    let err = session().analyze_document(&doc).await.unwrap_err();
    assert!(matches!(err, TextReaderError::EmptyDocument));
}

#[tokio::test]
async fn test_json_output_round_trips() {
    let mut config = Config::default();
    config.embedding.enabled = false;
    config.output.format = OutputFormat::Json;
    let session = ReaderSession::with_engines(config, None, Box::new(EspeakEngine::new()));

    let result = session
        .analyze_text("Numbers and words. More words!")
        .await
        .unwrap();
    let rendered = session.render(&result).unwrap();

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["statistics"]["sentence_count"], 2);
    assert!(value["embedding_sample"].is_null());
}

#[tokio::test]
async fn test_repeat_analysis_is_identical() {
    let session = session();
    let text = "Stable output matters. Stable output is testable.";

    let first = session.analyze_text(text).await.unwrap();
    let second = session.analyze_text(text).await.unwrap();
    assert_eq!(first, second);
}
