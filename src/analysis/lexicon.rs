//! Fixed word lists backing the naive lexical analyses
//!
//! Process-wide constants, never mutated at runtime. The sentiment markers
//! and stop words are deliberately tiny; this is word-counting, not NLP.

use std::collections::HashSet;
use std::sync::OnceLock;

pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "happy",
    "positive",
    "wonderful",
    "love",
    "best",
    "beautiful",
    "nice",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "sad",
    "negative",
    "horrible",
    "hate",
    "worst",
    "ugly",
    "poor",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "by", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "shall", "should", "can", "could", "may", "might", "must", "of", "in", "with",
    "about", "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "from", "up", "down", "this", "that", "these", "those", "i", "you", "he", "she",
    "it", "we", "they", "me", "him", "her", "us", "them",
];

pub fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}
