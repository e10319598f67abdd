//! Display and narration settings
//!
//! Each setting moves in fixed steps inside a closed range. A step that
//! would leave the range is refused and the value stays where it is.

use serde::{Deserialize, Serialize};

/// Font size in points
pub const FONT_SIZE_DEFAULT: u32 = 18;
pub const FONT_SIZE_MIN: u32 = 12;
pub const FONT_SIZE_MAX: u32 = 48;
pub const FONT_SIZE_STEP: u32 = 2;

/// Line spacing multiplier (1.0 single, 2.0 double)
pub const LINE_SPACING_DEFAULT: f32 = 1.5;
pub const LINE_SPACING_MIN: f32 = 1.0;
pub const LINE_SPACING_MAX: f32 = 3.0;
pub const LINE_SPACING_STEP: f32 = 0.25;

/// Narration rate in words per minute
pub const NARRATION_RATE_DEFAULT: u32 = 150;
pub const NARRATION_RATE_MIN: u32 = 80;
pub const NARRATION_RATE_MAX: u32 = 250;
pub const NARRATION_RATE_STEP: u32 = 10;

/// Reader settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub font_size: u32,
    pub line_spacing: f32,
    pub narration_rate: u32,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        ReaderSettings {
            font_size: FONT_SIZE_DEFAULT,
            line_spacing: LINE_SPACING_DEFAULT,
            narration_rate: NARRATION_RATE_DEFAULT,
        }
    }
}

impl ReaderSettings {
    /// Bring loaded values back inside their ranges
    pub fn normalized(self) -> Self {
        let line_spacing = if self.line_spacing.is_nan() {
            LINE_SPACING_DEFAULT
        } else {
            self.line_spacing.clamp(LINE_SPACING_MIN, LINE_SPACING_MAX)
        };
        ReaderSettings {
            font_size: self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX),
            line_spacing,
            narration_rate: self.narration_rate.clamp(NARRATION_RATE_MIN, NARRATION_RATE_MAX),
        }
    }

    /// Returns false when already at the maximum
    pub fn increase_font(&mut self) -> bool {
        step_up(&mut self.font_size, FONT_SIZE_STEP, FONT_SIZE_MAX)
    }

    /// Returns false when already at the minimum
    pub fn decrease_font(&mut self) -> bool {
        step_down(&mut self.font_size, FONT_SIZE_STEP, FONT_SIZE_MIN)
    }

    pub fn increase_spacing(&mut self) -> bool {
        let next = self.line_spacing + LINE_SPACING_STEP;
        if next > LINE_SPACING_MAX {
            return false;
        }
        self.line_spacing = next;
        true
    }

    pub fn decrease_spacing(&mut self) -> bool {
        let next = self.line_spacing - LINE_SPACING_STEP;
        if next < LINE_SPACING_MIN {
            return false;
        }
        self.line_spacing = next;
        true
    }

    pub fn increase_rate(&mut self) -> bool {
        step_up(&mut self.narration_rate, NARRATION_RATE_STEP, NARRATION_RATE_MAX)
    }

    pub fn decrease_rate(&mut self) -> bool {
        step_down(&mut self.narration_rate, NARRATION_RATE_STEP, NARRATION_RATE_MIN)
    }

    /// Set the narration rate, clamped to the supported range
    pub fn set_narration_rate(&mut self, wpm: u32) -> u32 {
        self.narration_rate = wpm.clamp(NARRATION_RATE_MIN, NARRATION_RATE_MAX);
        self.narration_rate
    }
}

fn step_up(value: &mut u32, step: u32, max: u32) -> bool {
    match value.checked_add(step) {
        Some(next) if next <= max => {
            *value = next;
            true
        }
        _ => false,
    }
}

fn step_down(value: &mut u32, step: u32, min: u32) -> bool {
    match value.checked_sub(step) {
        Some(next) if next >= min => {
            *value = next;
            true
        }
        _ => false,
    }
}
