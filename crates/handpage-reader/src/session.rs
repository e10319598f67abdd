//! Reader session - applies actions to the reading view

use handpage_core::{Action, GestureLabel};
use tracing::{debug, info};

use crate::{NarrationState, Narrator, ReaderSettings};

/// Page shown when a document has no text
pub const EMPTY_DOCUMENT: &str = "No content to display.";

/// Visible effect of one action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReaderChange {
    FontSize(u32),
    LineSpacing(f32),
    /// Zero-based page index and page count
    Page { index: usize, total: usize },
    Narration(NarrationState),
    /// At a bound, or nothing to do
    Unchanged,
}

impl ReaderChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, ReaderChange::Unchanged)
    }
}

/// Paginated document, display settings and narration for one reader
#[derive(Debug)]
pub struct ReaderSession<N: Narrator> {
    pages: Vec<String>,
    page: usize,
    settings: ReaderSettings,
    narrator: N,
    /// On at construction; an embedding UI that wants opt-in control turns it off first
    gestures_enabled: bool,
}

impl<N: Narrator> ReaderSession<N> {
    /// Session with default settings, on the first page
    pub fn new(pages: Vec<String>, narrator: N) -> Self {
        Self::with_settings(pages, ReaderSettings::default(), narrator)
    }

    pub fn with_settings(pages: Vec<String>, settings: ReaderSettings, mut narrator: N) -> Self {
        let settings = settings.normalized();
        narrator.set_rate(settings.narration_rate);
        ReaderSession {
            pages: non_empty(pages),
            page: 0,
            settings,
            narrator,
            gestures_enabled: true,
        }
    }

    /// Replace the document; narration stops and the view returns to page one
    pub fn load_pages(&mut self, pages: Vec<String>) {
        self.narrator.stop();
        self.pages = non_empty(pages);
        self.page = 0;
        info!(pages = self.pages.len(), "document loaded");
    }

    /// Perform an action
    pub fn apply(&mut self, action: Action) -> ReaderChange {
        let change = match action {
            Action::IncreaseFont => {
                let changed = self.settings.increase_font();
                self.font_change(changed)
            }
            Action::DecreaseFont => {
                let changed = self.settings.decrease_font();
                self.font_change(changed)
            }
            Action::IncreaseSpacing => {
                let changed = self.settings.increase_spacing();
                self.spacing_change(changed)
            }
            Action::DecreaseSpacing => {
                let changed = self.settings.decrease_spacing();
                self.spacing_change(changed)
            }
            Action::NextPage => self.next_page(),
            Action::PreviousPage => self.previous_page(),
            Action::ToggleNarration => self.toggle_narration(),
            Action::StopNarration => self.stop_narration(),
        };
        debug!(%action, ?change, "action applied");
        change
    }

    /// Perform a gesture-triggered action unless gestures are disabled
    pub fn apply_gesture(&mut self, gesture: GestureLabel, action: Action) -> Option<ReaderChange> {
        if !self.gestures_enabled {
            debug!(%gesture, %action, "gesture ignored: gestures disabled");
            return None;
        }
        Some(self.apply(action))
    }

    pub fn next_page(&mut self) -> ReaderChange {
        if self.page + 1 >= self.pages.len() {
            return ReaderChange::Unchanged;
        }
        self.narrator.stop();
        self.page += 1;
        self.page_change()
    }

    pub fn previous_page(&mut self) -> ReaderChange {
        if self.page == 0 {
            return ReaderChange::Unchanged;
        }
        self.narrator.stop();
        self.page -= 1;
        self.page_change()
    }

    /// Stopped → play the current page, playing → pause, paused → resume
    pub fn toggle_narration(&mut self) -> ReaderChange {
        match self.narrator.state() {
            NarrationState::Stopped => {
                let text = &self.pages[self.page];
                self.narrator.play(text);
            }
            NarrationState::Playing => {
                self.narrator.pause();
            }
            NarrationState::Paused => {
                self.narrator.resume();
            }
        }
        ReaderChange::Narration(self.narrator.state())
    }

    pub fn stop_narration(&mut self) -> ReaderChange {
        if self.narrator.state() == NarrationState::Stopped {
            return ReaderChange::Unchanged;
        }
        self.narrator.stop();
        ReaderChange::Narration(NarrationState::Stopped)
    }

    /// Clamped to the supported range; returns the rate in effect
    pub fn set_narration_rate(&mut self, wpm: u32) -> u32 {
        let rate = self.settings.set_narration_rate(wpm);
        self.narrator.set_rate(rate);
        rate
    }

    pub fn set_voice(&mut self, index: usize) -> bool {
        self.narrator.set_voice(index)
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        if self.gestures_enabled != enabled {
            info!(enabled, "gesture control toggled");
        }
        self.gestures_enabled = enabled;
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Zero-based index of the visible page
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_text(&self) -> &str {
        &self.pages[self.page]
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    pub fn narrator_mut(&mut self) -> &mut N {
        &mut self.narrator
    }

    fn font_change(&self, changed: bool) -> ReaderChange {
        if changed {
            ReaderChange::FontSize(self.settings.font_size)
        } else {
            ReaderChange::Unchanged
        }
    }

    fn spacing_change(&self, changed: bool) -> ReaderChange {
        if changed {
            ReaderChange::LineSpacing(self.settings.line_spacing)
        } else {
            ReaderChange::Unchanged
        }
    }

    fn page_change(&self) -> ReaderChange {
        ReaderChange::Page {
            index: self.page,
            total: self.pages.len(),
        }
    }
}

fn non_empty(pages: Vec<String>) -> Vec<String> {
    if pages.is_empty() {
        vec![EMPTY_DOCUMENT.to_string()]
    } else {
        pages
    }
}
