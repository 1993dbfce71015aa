//! Word-list sentiment scoring

use crate::analysis::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    VeryPositive,
    SomewhatPositive,
    Neutral,
    SomewhatNegative,
    VeryNegative,
}

impl SentimentLabel {
    /// Five-bucket mapping. Zero is its own bucket, never folded into a
    /// neighbor.
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            SentimentLabel::VeryPositive
        } else if score > 0.0 {
            SentimentLabel::SomewhatPositive
        } else if score == 0.0 {
            SentimentLabel::Neutral
        } else if score > -0.5 {
            SentimentLabel::SomewhatNegative
        } else {
            SentimentLabel::VeryNegative
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::VeryPositive => write!(f, "Very Positive"),
            SentimentLabel::SomewhatPositive => write!(f, "Somewhat Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::SomewhatNegative => write!(f, "Somewhat Negative"),
            SentimentLabel::VeryNegative => write!(f, "Very Negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub score: f64,
    pub label: SentimentLabel,
}

/// Counts whole-word marker occurrences over the lower-cased text.
pub struct SentimentScorer {
    positive: Vec<Regex>,
    negative: Vec<Regex>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            positive: Self::compile(POSITIVE_WORDS),
            negative: Self::compile(NEGATIVE_WORDS),
        }
    }

    fn compile(words: &[&str]) -> Vec<Regex> {
        words
            .iter()
            .map(|word| {
                Regex::new(&format!(r"\b{}\b", regex::escape(word)))
                    .expect("Invalid marker word regex")
            })
            .collect()
    }

    pub fn score(&self, text: &str) -> SentimentReport {
        let lower = text.to_lowercase();

        let positive_count: usize = self.positive.iter().map(|re| re.find_iter(&lower).count()).sum();
        let negative_count: usize = self.negative.iter().map(|re| re.find_iter(&lower).count()).sum();

        let total = positive_count + negative_count;
        // No markers at all means neutral, not an error
        let score = if total == 0 {
            0.0
        } else {
            (positive_count as f64 - negative_count as f64) / total as f64
        };

        SentimentReport {
            score,
            label: SentimentLabel::from_score(score),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
