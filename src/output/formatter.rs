//! Render an analysis result for the console or as JSON

use crate::analysis::{AnalysisResult, SentimentLabel};
use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use std::fmt::Write;

pub fn render(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(render_console(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

fn render_console(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let label = result.sentiment.label.to_string();
    let label = match result.sentiment.label {
        SentimentLabel::VeryPositive => label.green().bold(),
        SentimentLabel::SomewhatPositive => label.green(),
        SentimentLabel::Neutral => label.blue(),
        SentimentLabel::SomewhatNegative => label.yellow(),
        SentimentLabel::VeryNegative => label.red().bold(),
    };
    let _ = writeln!(out, "{}", "Sentiment".bold());
    let _ = writeln!(out, "  {} (score: {:.2})", label, result.sentiment.score);

    let stats = &result.statistics;
    let _ = writeln!(out, "\n{}", "Statistics".bold());
    let _ = writeln!(out, "  Characters: {}", stats.char_count);
    let _ = writeln!(out, "  Words: {}", stats.word_count);
    let _ = writeln!(out, "  Sentences: {}", stats.sentence_count);
    let _ = writeln!(
        out,
        "  Average word length: {}",
        match stats.avg_word_length {
            Some(avg) => format!("{:.2} characters", avg),
            None => "unavailable".to_string(),
        }
    );
    let _ = writeln!(
        out,
        "  Average sentence length: {}",
        match stats.avg_sentence_length {
            Some(avg) => format!("{:.2} words", avg),
            None => "unavailable".to_string(),
        }
    );

    let _ = writeln!(out, "\n{}", "Key Phrases".bold());
    if result.key_phrases.is_empty() {
        let _ = writeln!(out, "  No key phrases found.");
    } else {
        let phrases: Vec<String> = result
            .key_phrases
            .iter()
            .map(|p| format!("{} ({})", p.word, p.frequency))
            .collect();
        let _ = writeln!(out, "  {}", phrases.join(", "));
    }

    let _ = writeln!(out, "\n{}", "Embeddings".bold());
    match &result.embedding_sample {
        Some(sample) => {
            let values: Vec<String> = sample.values.iter().map(|v| format!("{:.4}", v)).collect();
            let _ = writeln!(out, "  Dimensions: {}", sample.dimension);
            let _ = writeln!(
                out,
                "  Sample (first {} values of first sentence):",
                sample.values.len()
            );
            let _ = writeln!(out, "  [{}...]", values.join(", "));
        }
        None => {
            let _ = writeln!(out, "  Embedding sample unavailable.");
        }
    }

    out
}
