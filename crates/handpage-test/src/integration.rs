//! End-to-end reading sessions
//!
//! Drives the whole stack on a manual clock:
//! - A seeded `JitterSource` plays the tracker
//! - A `GestureController` polls it and runs the pipeline
//! - Dispatched commands cross the channel into a `ReaderSession`

use std::sync::Arc;

use handpage_reader::{MemoryNarrator, NarrationState, Narrator, ReaderChange, ReaderSession};
use handpage_runtime::{
    apply_pending, GestureController, PollOutcome, RuntimeConfig, RuntimeResult, RuntimeStats,
};
use handpage_time::ManualClock;

use crate::{JitterConfig, JitterSource};

/// Configuration for one end-to-end run
#[derive(Clone, Debug)]
pub struct ReadingSessionConfig {
    pub runtime: RuntimeConfig,
    pub jitter: JitterConfig,
    pub seed: u64,
    /// Document shown by the reader
    pub pages: Vec<String>,
}

impl Default for ReadingSessionConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReadingSessionConfig {
    /// Noise-free tracker
    pub fn minimal() -> Self {
        ReadingSessionConfig {
            runtime: RuntimeConfig::default(),
            jitter: JitterConfig::none(),
            seed: 0,
            pages: sample_pages(3),
        }
    }

    /// Typical webcam noise
    pub fn standard() -> Self {
        ReadingSessionConfig {
            jitter: JitterConfig::shaky(),
            ..Self::minimal()
        }
    }

    /// Tremor and poor lighting
    pub fn stress() -> Self {
        ReadingSessionConfig {
            jitter: JitterConfig::tremor(),
            ..Self::minimal()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = jitter;
        self
    }
}

/// `count` short numbered pages
pub fn sample_pages(count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| format!("Page {n}. The quick brown fox jumps over the lazy dog."))
        .collect()
}

/// What a reading session ended up with
#[derive(Clone, Debug)]
pub struct ReadingSessionResult {
    /// Reader changes in the order they were applied
    pub changes: Vec<ReaderChange>,
    pub stats: RuntimeStats,
    pub font_size: u32,
    pub line_spacing: f32,
    pub page: usize,
    pub narration: NarrationState,
}

impl ReadingSessionResult {
    /// Changes that altered the view or narration
    pub fn effective_changes(&self) -> usize {
        self.changes.iter().filter(|c| c.is_change()).count()
    }

    pub fn page_turns(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, ReaderChange::Page { .. }))
            .count()
    }
}

/// Reader session fed by a jittered tracker
#[derive(Debug)]
pub struct ReadingSessionHarness {
    config: ReadingSessionConfig,
    session: ReaderSession<MemoryNarrator>,
}

impl ReadingSessionHarness {
    pub fn new(config: ReadingSessionConfig) -> Self {
        let session = ReaderSession::with_settings(
            config.pages.clone(),
            config.runtime.reader,
            MemoryNarrator::new(),
        );
        ReadingSessionHarness { config, session }
    }

    /// Empty source carrying the configured noise model and seed
    pub fn source(&self) -> JitterSource {
        JitterSource::new(self.config.jitter.clone(), self.config.seed)
    }

    /// Play `source` to the end, applying commands after every frame
    pub fn run(&mut self, source: JitterSource) -> RuntimeResult<ReadingSessionResult> {
        let clock = ManualClock::new();
        let interval = self.config.runtime.poll_interval;
        let mut controller = GestureController::with_clock(
            self.config.runtime.clone(),
            source,
            Arc::new(clock.clone()),
        )?;
        let mut rx = controller.command_channel();

        let mut changes = Vec::new();
        while controller.poll_once() != PollOutcome::Exhausted {
            changes.extend(apply_pending(&mut rx, &mut self.session));
            clock.advance(interval);
        }

        let settings = self.session.settings();
        Ok(ReadingSessionResult {
            changes,
            stats: controller.stats().clone(),
            font_size: settings.font_size,
            line_spacing: settings.line_spacing,
            page: self.session.current_page(),
            narration: self.session.narrator().state(),
        })
    }

    pub fn session(&self) -> &ReaderSession<MemoryNarrator> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ReaderSession<MemoryNarrator> {
        &mut self.session
    }
}
