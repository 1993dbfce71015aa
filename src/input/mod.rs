//! Document input: media type detection, per-format extractors, dispatch

pub mod dispatcher;
pub mod docx;
pub mod document;
pub mod extractor;
pub mod pdf;

pub use dispatcher::Dispatcher;
pub use document::{Document, MediaType};
