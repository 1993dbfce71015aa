//! CLI interface for the text reader

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "text-reader")]
#[command(about = "Document reader with lexical analysis and speech output")]
#[command(
    long_about = "Extract text from TXT, PDF, and DOCX documents, analyze sentiment, statistics, and key phrases, and read text aloud"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document or typed text
    Analyze {
        /// Path to the document (TXT, PDF, DOCX)
        file: Option<PathBuf>,

        /// Analyze this text instead of a file
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Declared media type, overrides extension detection
        /// (e.g. "application/pdf")
        #[arg(short, long)]
        media_type: Option<String>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the embedding sample
        #[arg(long)]
        no_embeddings: bool,

        /// Show extracted text preview and document metadata
        #[arg(short, long)]
        detailed: bool,
    },

    /// Read a document or typed text aloud
    Speak {
        /// Path to the document (TXT, PDF, DOCX)
        file: Option<PathBuf>,

        /// Speak this text instead of a file
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Speaking rate multiplier
        #[arg(long)]
        rate: Option<f32>,

        /// Pitch multiplier
        #[arg(long)]
        pitch: Option<f32>,

        /// Volume multiplier
        #[arg(long)]
        volume: Option<f32>,

        /// Voice name to use
        #[arg(long)]
        voice: Option<String>,
    },

    /// List available speech voices
    Voices,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("yaml").is_err());
    }
}
