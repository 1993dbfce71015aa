//! Document model and media type detection

use crate::error::{Result, TextReaderError};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
    WordDocument,
}

impl MediaType {
    /// Parse a declared media-type string. The declared type is trusted,
    /// no content sniffing happens anywhere downstream.
    pub fn from_declared(media_type: &str) -> Result<Self> {
        match media_type {
            "text/plain" => Ok(MediaType::PlainText),
            "application/pdf" => Ok(MediaType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(MediaType::WordDocument)
            }
            other => Err(TextReaderError::UnsupportedType(other.to_string())),
        }
    }

    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Ok(MediaType::PlainText),
            "pdf" => Ok(MediaType::Pdf),
            "docx" => Ok(MediaType::WordDocument),
            other => Err(TextReaderError::UnsupportedType(format!(".{}", other))),
        }
    }

    /// Friendly name for display next to the file name.
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaType::PlainText => "TXT",
            MediaType::Pdf => "PDF",
            MediaType::WordDocument => "DOCX",
        }
    }
}

/// A selected input file: raw bytes plus the declared media type.
/// Immutable once constructed, replaced wholesale for a new file.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub name: String,
    pub media_type: MediaType,
}

impl Document {
    pub fn new(bytes: Vec<u8>, name: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            bytes,
            name: name.into(),
            media_type,
        }
    }

    /// Read a document from disk, deriving the media type from the file
    /// extension unless an explicit declared type overrides it.
    pub async fn from_path(path: &Path, declared: Option<&str>) -> Result<Self> {
        if !path.exists() {
            return Err(TextReaderError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let media_type = match declared {
            Some(tag) => MediaType::from_declared(tag)?,
            None => {
                let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
                    TextReaderError::InvalidInput(format!(
                        "File has no extension: {}",
                        path.display()
                    ))
                })?;
                MediaType::from_extension(ext)?
            }
        };

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(bytes, name, media_type))
    }
}
