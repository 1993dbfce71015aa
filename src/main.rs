//! Text reader: document analysis and read-aloud CLI

use clap::Parser;
use log::error;
use std::process;
use text_reader::cli::{self, Cli, Commands, ConfigAction};
use text_reader::config::Config;
use text_reader::error::{Result, TextReaderError};
use text_reader::input::Document;
use text_reader::speech::{select_voice, SpeechEvent};
use text_reader::ReaderSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            text,
            media_type,
            output,
            save,
            no_embeddings,
            detailed,
        } => {
            let format = cli::parse_output_format(&output).map_err(TextReaderError::InvalidInput)?;
            config.output.format = format;
            if no_embeddings {
                config.embedding.enabled = false;
            }

            let session = ReaderSession::new(config);

            let result = match (file, text) {
                (Some(path), None) => {
                    let doc = Document::from_path(&path, media_type.as_deref()).await?;
                    println!(
                        "Analyzing {} ({})",
                        doc.name,
                        doc.media_type.display_name()
                    );

                    if detailed {
                        if let Some(metadata) = session.document_metadata(&doc)? {
                            println!("Title: {}", metadata.title.as_deref().unwrap_or("Untitled"));
                            println!("Author: {}", metadata.author.as_deref().unwrap_or("Unknown"));
                            println!("Pages: {}", metadata.page_count);
                            if metadata.encrypted {
                                println!("Encrypted: yes");
                            }
                        }
                    }

                    let (extracted, result) = session.analyze_document(&doc).await?;
                    if detailed {
                        println!("\nExtracted text preview:");
                        println!("{}\n", truncate_text(&extracted, 300));
                    }
                    result
                }
                (None, Some(text)) => session.analyze_text(&text).await?,
                _ => {
                    return Err(TextReaderError::InvalidInput(
                        "provide a file path or --text, but not both".to_string(),
                    ))
                }
            };

            let rendered = session.render(&result)?;
            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Saved analysis to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Speak {
            file,
            text,
            rate,
            pitch,
            volume,
            voice,
        } => {
            if let Some(rate) = rate {
                config.speech.rate = rate;
            }
            if let Some(pitch) = pitch {
                config.speech.pitch = pitch;
            }
            if let Some(volume) = volume {
                config.speech.volume = volume;
            }

            let session = ReaderSession::new(config);

            let text = match (file, text) {
                (Some(path), None) => {
                    let doc = Document::from_path(&path, None).await?;
                    session.extract_document(&doc).await?
                }
                (None, Some(text)) => text,
                _ => {
                    return Err(TextReaderError::InvalidInput(
                        "provide a file path or --text, but not both".to_string(),
                    ))
                }
            };

            println!("Speaking... press Ctrl-C to stop");
            let mut handle = session.speak(&text, voice.as_deref())?;

            let canceller = handle.canceller();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    canceller.cancel();
                }
            });

            match handle.finished().await {
                SpeechEvent::Errored(message) => {
                    return Err(TextReaderError::Speech(message));
                }
                _ => println!("Done."),
            }
        }

        Commands::Voices => {
            let session = ReaderSession::new(config);
            let voices = session.voices()?;
            if voices.is_empty() {
                println!("No voices available.");
                return Ok(());
            }

            let chosen = select_voice(&voices, session.config().speech.voice.as_deref())
                .map(|v| v.name.clone());
            println!("Available voices:");
            for voice in &voices {
                let marker = if Some(&voice.name) == chosen.as_ref() {
                    " (selected)"
                } else {
                    ""
                };
                println!("  {} [{}]{}", voice.name, voice.lang, marker);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    TextReaderError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}

/// Truncate text to a maximum length with ellipsis, breaking at a word
/// boundary.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
