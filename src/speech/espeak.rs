//! espeak-ng backed speech engine
//!
//! Shells out to the `espeak-ng` binary. Parameters map onto its flags:
//! rate multiplies the 175 wpm default, pitch scales the 0-99 range around
//! 50, volume scales amplitude around 100.

use crate::error::{Result, TextReaderError};
use crate::speech::{SpeechEngine, SpeechEvent, SpeechHandle, Utterance, VoiceInfo};
use log::debug;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};

const BASE_WPM: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 100.0;

pub struct EspeakEngine {
    program: String,
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            program: "espeak-ng".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args_for(utterance: &Utterance) -> Vec<String> {
        let mut args = vec![
            "-s".to_string(),
            format!("{}", (BASE_WPM * utterance.rate).round() as u32),
            "-p".to_string(),
            format!("{}", (BASE_PITCH * utterance.pitch).clamp(0.0, 99.0).round() as u32),
            "-a".to_string(),
            format!("{}", (BASE_AMPLITUDE * utterance.volume).clamp(0.0, 200.0).round() as u32),
        ];
        if let Some(voice) = &utterance.voice {
            args.push("-v".to_string());
            args.push(voice.clone());
        }
        args.push(utterance.text.clone());
        args
    }
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for EspeakEngine {
    fn voices(&self) -> Result<Vec<VoiceInfo>> {
        let output = std::process::Command::new(&self.program)
            .arg("--voices")
            .output()
            .map_err(|e| TextReaderError::Speech(format!("cannot list voices: {}", e)))?;
        if !output.status.success() {
            return Err(TextReaderError::Speech(format!(
                "{} --voices exited with {}",
                self.program, output.status
            )));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        // Columns: Pty Language Age/Gender VoiceName File Other
        let voices = listing
            .lines()
            .skip(1)
            .filter_map(|line| {
                let fields: Vec<&str> = line.split_whitespace().collect();
                match (fields.get(1), fields.get(3)) {
                    (Some(lang), Some(name)) => Some(VoiceInfo {
                        name: name.to_string(),
                        lang: lang.to_string(),
                        local: true,
                    }),
                    _ => None,
                }
            })
            .collect();
        Ok(voices)
    }

    fn speak(&self, utterance: Utterance) -> Result<SpeechHandle> {
        let (tx, rx) = mpsc::channel(4);
        let cancel = Arc::new(Notify::new());
        let cancelled = Arc::clone(&cancel);
        let program = self.program.clone();
        let args = Self::args_for(&utterance);
        debug!("speaking {} characters via {}", utterance.text.len(), program);

        tokio::spawn(async move {
            let child = tokio::process::Command::new(&program)
                .args(&args)
                .stdout(std::process::Stdio::null())
                .spawn();
            let mut child = match child {
                Ok(child) => child,
                Err(e) => {
                    let _ = tx
                        .send(SpeechEvent::Errored(format!("cannot start {}: {}", program, e)))
                        .await;
                    return;
                }
            };

            let _ = tx.send(SpeechEvent::Started).await;

            tokio::select! {
                status = child.wait() => {
                    let event = match status {
                        Ok(status) if status.success() => SpeechEvent::Ended,
                        Ok(status) => SpeechEvent::Errored(format!("{} exited with {}", program, status)),
                        Err(e) => SpeechEvent::Errored(e.to_string()),
                    };
                    let _ = tx.send(event).await;
                }
                _ = cancelled.notified() => {
                    let _ = child.kill().await;
                    let _ = tx.send(SpeechEvent::Ended).await;
                }
            }
        });

        Ok(SpeechHandle::new(rx, cancel))
    }
}
