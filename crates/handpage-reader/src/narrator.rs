//! Narration black box

use std::fmt;

use serde::{Deserialize, Serialize};

/// Playback state reported by a narrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl NarrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for NarrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-to-speech engine as seen by the reader
///
/// Synthesis and audio output happen behind this trait. `pause` and
/// `resume` report whether they changed anything.
pub trait Narrator {
    /// Start reading `text` from the beginning, replacing any current speech
    fn play(&mut self, text: &str);
    fn pause(&mut self) -> bool;
    fn resume(&mut self) -> bool;
    fn stop(&mut self);
    fn state(&self) -> NarrationState;
    /// Words per minute
    fn set_rate(&mut self, wpm: u32);
    /// Returns false for an unknown voice index
    fn set_voice(&mut self, index: usize) -> bool;
}

/// In-memory narrator that tracks state without producing audio
///
/// Used for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryNarrator {
    state: NarrationState,
    text: Option<String>,
    rate: Option<u32>,
    voice: usize,
    voices: usize,
    plays: usize,
}

impl MemoryNarrator {
    /// Narrator with a single voice
    pub fn new() -> Self {
        Self::with_voices(1)
    }

    pub fn with_voices(voices: usize) -> Self {
        MemoryNarrator {
            voices,
            ..Default::default()
        }
    }

    /// Text of the current or last utterance
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn rate(&self) -> Option<u32> {
        self.rate
    }

    pub fn voice(&self) -> usize {
        self.voice
    }

    /// Number of accepted `play` calls
    pub fn plays(&self) -> usize {
        self.plays
    }

    /// Speech ran to the end
    pub fn finish(&mut self) {
        self.state = NarrationState::Stopped;
    }
}

impl Narrator for MemoryNarrator {
    fn play(&mut self, text: &str) {
        self.stop();
        if text.trim().is_empty() {
            return;
        }
        self.text = Some(text.to_string());
        self.state = NarrationState::Playing;
        self.plays += 1;
    }

    fn pause(&mut self) -> bool {
        if self.state == NarrationState::Playing {
            self.state = NarrationState::Paused;
            return true;
        }
        false
    }

    fn resume(&mut self) -> bool {
        if self.state == NarrationState::Paused {
            self.state = NarrationState::Playing;
            return true;
        }
        false
    }

    fn stop(&mut self) {
        self.state = NarrationState::Stopped;
    }

    fn state(&self) -> NarrationState {
        self.state
    }

    fn set_rate(&mut self, wpm: u32) {
        self.rate = Some(wpm);
    }

    fn set_voice(&mut self, index: usize) -> bool {
        if index < self.voices {
            self.voice = index;
            return true;
        }
        false
    }
}
