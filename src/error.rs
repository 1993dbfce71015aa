//! Error handling for the text reader

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextReaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Document contains no extractable text")]
    EmptyDocument,

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TextReaderError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for TextReaderError {
    fn from(err: anyhow::Error) -> Self {
        TextReaderError::Extraction(err.to_string())
    }
}
