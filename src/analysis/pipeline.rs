//! The analysis pipeline: one invocation in, one full result record out

use crate::analysis::embeddings::{EmbeddingEngine, EmbeddingSample};
use crate::analysis::key_phrases::{extract_key_phrases, KeyPhrase};
use crate::analysis::sentiment::{SentimentReport, SentimentScorer};
use crate::analysis::statistics::{self, TextStatistics};
use crate::error::{Result, TextReaderError};
use log::warn;
use serde::Serialize;

/// Split on runs of sentence-ending punctuation, dropping whitespace-only
/// fragments. Shared by the embedding step, statistics, and key phrases.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Absent when the embedding engine is unavailable or failed; the other
    /// analyses are computed regardless.
    pub embedding_sample: Option<EmbeddingSample>,
    pub sentiment: SentimentReport,
    pub statistics: TextStatistics,
    pub key_phrases: Vec<KeyPhrase>,
}

pub struct AnalysisPipeline {
    scorer: SentimentScorer,
    embedding_engine: Option<Box<dyn EmbeddingEngine>>,
    max_key_phrases: usize,
    sample_len: usize,
}

impl AnalysisPipeline {
    pub fn new(
        embedding_engine: Option<Box<dyn EmbeddingEngine>>,
        max_key_phrases: usize,
        sample_len: usize,
    ) -> Self {
        Self {
            scorer: SentimentScorer::new(),
            embedding_engine,
            max_key_phrases,
            sample_len,
        }
    }

    /// Run all analyses over non-empty trimmed text and assemble the result
    /// record. Recomputed in full every time; the steps share no mutable
    /// state.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TextReaderError::InvalidInput(
                "analysis requires non-empty text".to_string(),
            ));
        }

        let sentences = split_sentences(text);

        let embedding_sample = self.embedding_sample(&sentences);
        let sentiment = self.scorer.score(text);
        let statistics = statistics::compute(text, sentences.len());
        let key_phrases = extract_key_phrases(&sentences, self.max_key_phrases);

        Ok(AnalysisResult {
            embedding_sample,
            sentiment,
            statistics,
            key_phrases,
        })
    }

    /// An engine failure degrades to an absent sample instead of aborting
    /// the invocation.
    fn embedding_sample(&self, sentences: &[String]) -> Option<EmbeddingSample> {
        let engine = self.embedding_engine.as_ref()?;
        if sentences.is_empty() {
            return None;
        }
        match engine.embed(sentences) {
            Ok(vectors) => vectors.first().map(|vector| EmbeddingSample {
                dimension: vector.len(),
                values: vector.iter().take(self.sample_len).copied().collect(),
            }),
            Err(e) => {
                warn!("embedding unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sentiment::SentimentLabel;

    struct FixedEngine {
        vector: Vec<f32>,
    }

    impl EmbeddingEngine for FixedEngine {
        fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(sentences.iter().map(|_| self.vector.clone()).collect())
        }
    }

    struct FailingEngine;

    impl EmbeddingEngine for FailingEngine {
        fn embed(&self, _sentences: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(TextReaderError::Embedding("engine offline".to_string()))
        }
    }

    fn pipeline_without_embeddings() -> AnalysisPipeline {
        AnalysisPipeline::new(None, 10, 10)
    }

    #[test]
    fn test_sentence_split_discards_empty_fragments() {
        let sentences = split_sentences("One. Two!  ... Three?");
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_pipeline_runs() {
        let err = pipeline_without_embeddings().analyze("   ").await.unwrap_err();
        assert!(matches!(err, TextReaderError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_full_result_without_engine() {
        let result = pipeline_without_embeddings()
            .analyze("This is a wonderful day. The cat sat on the mat.")
            .await
            .unwrap();

        assert!(result.embedding_sample.is_none());
        assert_eq!(result.sentiment.label, SentimentLabel::VeryPositive);
        assert_eq!(result.statistics.sentence_count, 2);
        assert!(!result.key_phrases.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_sample_truncated_to_ten() {
        let vector: Vec<f32> = (0..512).map(|i| i as f32).collect();
        let pipeline = AnalysisPipeline::new(Some(Box::new(FixedEngine { vector })), 10, 10);

        let result = pipeline.analyze("Hello world.").await.unwrap();
        let sample = result.embedding_sample.unwrap();
        assert_eq!(sample.values.len(), 10);
        assert_eq!(sample.dimension, 512);
        assert_eq!(sample.values[3], 3.0);
    }

    #[tokio::test]
    async fn test_short_vector_sample_keeps_full_vector() {
        let pipeline = AnalysisPipeline::new(
            Some(Box::new(FixedEngine {
                vector: vec![0.5, -0.5],
            })),
            10,
            10,
        );
        let sample = pipeline
            .analyze("Hi there.")
            .await
            .unwrap()
            .embedding_sample
            .unwrap();
        assert_eq!(sample.values, vec![0.5, -0.5]);
        assert_eq!(sample.dimension, 2);
    }

    #[tokio::test]
    async fn test_engine_failure_degrades_gracefully() {
        let pipeline = AnalysisPipeline::new(Some(Box::new(FailingEngine)), 10, 10);
        let result = pipeline
            .analyze("Terrible weather. Awful forecast.")
            .await
            .unwrap();

        assert!(result.embedding_sample.is_none());
        assert_eq!(result.sentiment.label, SentimentLabel::VeryNegative);
        assert_eq!(result.statistics.word_count, 4);
        assert!(!result.key_phrases.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_is_idempotent() {
        let pipeline = AnalysisPipeline::new(
            Some(Box::new(FixedEngine {
                vector: vec![1.0; 16],
            })),
            10,
            10,
        );
        let text = "Good ideas repeat. Good results follow!";

        let first = pipeline.analyze(text).await.unwrap();
        let second = pipeline.analyze(text).await.unwrap();
        assert_eq!(first, second);
    }
}
