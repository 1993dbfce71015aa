//! Sentence-embedding engine boundary and the Model2Vec implementation

use crate::error::{Result, TextReaderError};
use log::info;
use model2vec_rs::model::StaticModel;
use serde::Serialize;
use std::path::Path;

/// Diagnostic excerpt of the first sentence's embedding vector: at most the
/// leading ten components, with the full dimension reported alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingSample {
    pub values: Vec<f32>,
    pub dimension: usize,
}

/// External sentence-embedding engine: one fixed-dimension vector per
/// sentence.
pub trait EmbeddingEngine: Send + Sync {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>>;
}

pub struct Model2VecEngine {
    model: StaticModel,
}

impl Model2VecEngine {
    pub fn load(model_path: &Path) -> Result<Self> {
        info!("loading embedding model from {}", model_path.display());
        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| TextReaderError::Embedding(format!("failed to load model: {}", e)))?;
        Ok(Self { model })
    }
}

impl EmbeddingEngine for Model2VecEngine {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(sentences))
    }
}
