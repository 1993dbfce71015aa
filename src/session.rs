//! Session wiring: one construction point for all the moving parts
//!
//! Everything that would otherwise live in module-level state (the loaded
//! embedding model, the configured speech adapter) is a field here with
//! clear ownership.

use crate::analysis::{AnalysisPipeline, AnalysisResult, EmbeddingEngine, Model2VecEngine};
use crate::config::Config;
use crate::error::Result;
use crate::input::pdf::PdfMetadata;
use crate::input::{Dispatcher, Document};
use crate::output;
use crate::speech::espeak::EspeakEngine;
use crate::speech::{SpeechAdapter, SpeechEngine, SpeechHandle, VoiceInfo};
use log::warn;

pub struct ReaderSession {
    config: Config,
    dispatcher: Dispatcher,
    pipeline: AnalysisPipeline,
    speech: SpeechAdapter,
}

impl ReaderSession {
    pub fn new(config: Config) -> Self {
        let embedding_engine = Self::load_embedding_engine(&config);
        Self::with_engines(config, embedding_engine, Box::new(EspeakEngine::new()))
    }

    /// Assemble a session from explicit engines. Tests use this to swap in
    /// scripted implementations.
    pub fn with_engines(
        config: Config,
        embedding_engine: Option<Box<dyn EmbeddingEngine>>,
        speech_engine: Box<dyn SpeechEngine>,
    ) -> Self {
        let pipeline = AnalysisPipeline::new(
            embedding_engine,
            config.processing.max_key_phrases,
            config.processing.embedding_sample_len,
        );
        let speech = SpeechAdapter::new(speech_engine, config.speech.clone());

        Self {
            config,
            dispatcher: Dispatcher::new(),
            pipeline,
            speech,
        }
    }

    /// A missing or broken model only disables the embedding sample, never
    /// the session.
    fn load_embedding_engine(config: &Config) -> Option<Box<dyn EmbeddingEngine>> {
        if !config.embedding.enabled {
            return None;
        }
        match Model2VecEngine::load(&config.embedding_model_path()) {
            Ok(engine) => Some(Box::new(engine)),
            Err(e) => {
                warn!("embeddings disabled: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn extract_document(&self, doc: &Document) -> Result<String> {
        self.dispatcher.extract(doc).await
    }

    /// Extract a document's text and run the full analysis over it.
    pub async fn analyze_document(&self, doc: &Document) -> Result<(String, AnalysisResult)> {
        let text = self.extract_document(doc).await?;
        let result = self.pipeline.analyze(&text).await?;
        Ok((text, result))
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        self.pipeline.analyze(text).await
    }

    pub fn document_metadata(&self, doc: &Document) -> Result<Option<PdfMetadata>> {
        self.dispatcher.metadata(doc)
    }

    pub fn speak(&self, text: &str, voice_override: Option<&str>) -> Result<SpeechHandle> {
        self.speech.speak(text, voice_override)
    }

    pub fn voices(&self) -> Result<Vec<VoiceInfo>> {
        self.speech.voices()
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<String> {
        output::render(result, self.config.output.format)
    }
}
