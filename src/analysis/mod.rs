//! Lexical analysis: sentiment, statistics, key phrases, embedding sample

pub mod embeddings;
pub mod key_phrases;
pub mod lexicon;
pub mod pipeline;
pub mod sentiment;
pub mod statistics;

pub use embeddings::{EmbeddingEngine, EmbeddingSample, Model2VecEngine};
pub use key_phrases::KeyPhrase;
pub use pipeline::{AnalysisPipeline, AnalysisResult};
pub use sentiment::{SentimentLabel, SentimentReport};
pub use statistics::TextStatistics;
