//! Key-phrase extraction: frequent non-stop words as a cheap topic signal

use crate::analysis::lexicon::stop_words;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPhrase {
    pub word: String,
    pub frequency: usize,
}

/// Tokenize per sentence, drop stop words and words of length <= 2,
/// accumulate a global frequency map, and keep the `max` most frequent.
/// Ties are broken by first occurrence in the text, which keeps the output
/// deterministic.
pub fn extract_key_phrases(sentences: &[String], max: usize) -> Vec<KeyPhrase> {
    let stop = stop_words();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for sentence in sentences {
        for word in sentence.trim().to_lowercase().split_whitespace() {
            if word.chars().count() <= 2 || stop.contains(word) {
                continue;
            }
            if !counts.contains_key(word) {
                first_seen.push(word.to_string());
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    let mut phrases: Vec<KeyPhrase> = first_seen
        .into_iter()
        .map(|word| {
            let frequency = counts[&word];
            KeyPhrase { word, frequency }
        })
        .collect();

    // Stable sort preserves first-occurrence order among equal frequencies
    phrases.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    phrases.truncate(max);
    phrases
}
