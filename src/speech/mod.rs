//! Speech synthesis boundary
//!
//! The engine does the actual speaking; this module owns the voice
//! selection policy, utterance parameters, and the cancellation/event
//! contract callers rely on. Speaking is independent of analysis and the
//! two may run concurrently.

pub mod espeak;

use crate::config::SpeechConfig;
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
    /// Whether the voice is produced locally; non-local voices tend to be
    /// the higher-quality ones.
    pub local: bool,
}

#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<String>,
    /// Speaking rate multiplier, 1.0 = engine default.
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Errored(String),
}

/// A speech run in progress: event stream plus explicit cancellation.
pub struct SpeechHandle {
    pub events: mpsc::Receiver<SpeechEvent>,
    cancel: Arc<Notify>,
}

/// Detached cancellation trigger for a speech run; usable from another
/// task while the handle itself is being awaited.
#[derive(Clone)]
pub struct Canceller(Arc<Notify>);

impl Canceller {
    pub fn cancel(&self) {
        self.0.notify_one();
    }
}

impl SpeechHandle {
    pub fn new(events: mpsc::Receiver<SpeechEvent>, cancel: Arc<Notify>) -> Self {
        Self { events, cancel }
    }

    /// Stop the current utterance. Idempotent.
    pub fn cancel(&self) {
        self.cancel.notify_one();
    }

    pub fn canceller(&self) -> Canceller {
        Canceller(Arc::clone(&self.cancel))
    }

    /// Wait for the utterance to settle, returning the terminal event.
    pub async fn finished(&mut self) -> SpeechEvent {
        loop {
            match self.events.recv().await {
                Some(SpeechEvent::Started) => continue,
                Some(event) => return event,
                None => return SpeechEvent::Ended,
            }
        }
    }
}

/// Platform speech-synthesis engine boundary.
pub trait SpeechEngine: Send + Sync {
    fn voices(&self) -> Result<Vec<VoiceInfo>>;
    fn speak(&self, utterance: Utterance) -> Result<SpeechHandle>;
}

/// Prefer an explicitly requested voice, then an enhanced/non-local one,
/// then the first English voice, then whatever is first.
pub fn select_voice<'a>(voices: &'a [VoiceInfo], preferred: Option<&str>) -> Option<&'a VoiceInfo> {
    if let Some(name) = preferred {
        if let Some(voice) = voices.iter().find(|v| v.name == name) {
            return Some(voice);
        }
    }

    voices
        .iter()
        .find(|v| {
            v.name.contains("Premium")
                || v.name.contains("Enhanced")
                || v.name.contains("Neural")
                || !v.local
        })
        .or_else(|| voices.iter().find(|v| v.lang.starts_with("en")))
        .or_else(|| voices.first())
}

pub struct SpeechAdapter {
    engine: Box<dyn SpeechEngine>,
    config: SpeechConfig,
}

impl SpeechAdapter {
    pub fn new(engine: Box<dyn SpeechEngine>, config: SpeechConfig) -> Self {
        Self { engine, config }
    }

    pub fn voices(&self) -> Result<Vec<VoiceInfo>> {
        self.engine.voices()
    }

    /// Pick a voice per policy and hand the utterance to the engine.
    pub fn speak(&self, text: &str, voice_override: Option<&str>) -> Result<SpeechHandle> {
        let voices = self.engine.voices().unwrap_or_default();
        let preferred = voice_override.or(self.config.voice.as_deref());
        let voice = select_voice(&voices, preferred).map(|v| v.name.clone());

        self.engine.speak(Utterance {
            text: text.to_string(),
            voice,
            rate: self.config.rate,
            pitch: self.config.pitch,
            volume: self.config.volume,
        })
    }
}
