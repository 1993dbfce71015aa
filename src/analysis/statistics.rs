//! Descriptive text statistics

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStatistics {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Average word length in characters, two decimals. `None` when the
    /// text tokenizes to zero words, which a well-behaved extractor never
    /// produces.
    pub avg_word_length: Option<f64>,
    /// Average sentence length in words, two decimals. Same caveat.
    pub avg_sentence_length: Option<f64>,
}

/// Compute statistics over trimmed text. The sentence count comes from the
/// pipeline's shared sentence split so the two never disagree.
pub fn compute(text: &str, sentence_count: usize) -> TextStatistics {
    let char_count = text.chars().count();

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    let avg_word_length = if word_count > 0 {
        let total: usize = words.iter().map(|w| w.chars().count()).sum();
        Some(round2(total as f64 / word_count as f64))
    } else {
        None
    };

    let avg_sentence_length = if sentence_count > 0 {
        Some(round2(word_count as f64 / sentence_count as f64))
    } else {
        None
    };

    TextStatistics {
        char_count,
        word_count,
        sentence_count,
        avg_word_length,
        avg_sentence_length,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::split_sentences;

    #[test]
    fn test_statistics_round_trip() {
        let text = "Hello world. Good day!";
        let sentences = split_sentences(text);
        let stats = compute(text, sentences.len());

        assert_eq!(stats.char_count, text.chars().count());
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.avg_sentence_length, Some(2.0));
    }

    #[test]
    fn test_average_word_length_two_decimals() {
        // "one two three" -> (3 + 3 + 5) / 3 = 3.666... -> 3.67
        let stats = compute("one two three", 1);
        assert_eq!(stats.avg_word_length, Some(3.67));
    }

    #[test]
    fn test_degenerate_input_reports_unavailable() {
        let stats = compute("", 0);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.avg_word_length, None);
        assert_eq!(stats.avg_sentence_length, None);
    }
}
