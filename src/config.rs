//! Configuration management for the text reader

use crate::error::{Result, TextReaderError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub embedding: EmbeddingConfig,
    pub speech: SpeechConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Cap on key phrases in a result record.
    pub max_key_phrases: usize,
    /// Cap on components in the diagnostic embedding sample.
    pub embedding_sample_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub enabled: bool,
    pub models_dir: PathBuf,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".text-reader")
            .join("models");

        Self {
            processing: ProcessingConfig {
                max_key_phrases: 10,
                embedding_sample_len: 10,
            },
            embedding: EmbeddingConfig {
                enabled: true,
                models_dir,
                model: "minishlab/M2V_base_output".to_string(),
            },
            speech: SpeechConfig {
                // Slightly slower than the engine default reads more clearly
                rate: 0.9,
                pitch: 1.0,
                volume: 1.0,
                voice: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                TextReaderError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            TextReaderError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("text-reader")
            .join("config.toml")
    }

    /// Local directory the configured embedding model is expected in.
    pub fn embedding_model_path(&self) -> PathBuf {
        self.embedding.models_dir.join(&self.embedding.model)
    }
}
