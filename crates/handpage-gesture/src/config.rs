//! Gesture pipeline configuration
//!
//! All thresholds are in normalized frame units (fractions of the camera
//! frame). The defaults are empirically tuned for a webcam at arm's length.

use std::time::Duration;

use handpage_core::ActionMap;
use serde::{Deserialize, Serialize};

use crate::{GestureError, GestureResult};

/// Thumb orientation thresholds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbThresholds {
    /// `wrist.y - tip.y` above this → thumb up
    pub up: f32,
    /// `wrist.y - tip.y` below this → thumb down
    pub down: f32,
    /// `|tip.x - wrist.x|` above this (and neither up nor down) → sideways
    pub side: f32,
}

impl Default for ThumbThresholds {
    fn default() -> Self {
        ThumbThresholds {
            up: 0.15,
            down: -0.10,
            side: 0.12,
        }
    }
}

/// Thresholds deciding whether a thumb is tucked into a fist
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FistThresholds {
    /// Max horizontal distance from thumb tip to palm centre
    pub palm_x: f32,
    /// Max vertical distance from thumb tip to palm centre
    pub palm_y: f32,
    /// Max `|tip.y - wrist.y|` for a thumb that is not pointing anywhere
    pub vertical: f32,
}

impl Default for FistThresholds {
    fn default() -> Self {
        FistThresholds {
            palm_x: 0.15,
            palm_y: 0.15,
            vertical: 0.12,
        }
    }
}

/// Gesture pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum time between two dispatched actions
    #[serde(with = "duration_format")]
    pub cooldown: Duration,
    /// Raw labels kept for the majority vote
    pub history_capacity: usize,
    /// Samples required before anything can stabilize
    pub min_samples: usize,
    /// Fraction of the window the winning label must occupy
    pub majority_threshold: f64,
    /// Thumb orientation thresholds
    pub thumb: ThumbThresholds,
    /// Fist tuck thresholds
    pub fist: FistThresholds,
    /// Gesture → action table
    pub actions: ActionMap,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            cooldown: Duration::from_secs(1),
            history_capacity: 10,
            min_samples: 5,
            majority_threshold: 0.6,
            thumb: ThumbThresholds::default(),
            fist: FistThresholds::default(),
            actions: ActionMap::default(),
        }
    }
}

impl GestureConfig {
    /// Faster reaction for practised users
    pub fn responsive() -> Self {
        GestureConfig {
            cooldown: Duration::from_millis(600),
            history_capacity: 8,
            min_samples: 4,
            ..Default::default()
        }
    }

    /// Longer window and stricter vote for unsteady hands
    pub fn steady() -> Self {
        GestureConfig {
            cooldown: Duration::from_millis(1500),
            history_capacity: 15,
            min_samples: 8,
            majority_threshold: 0.7,
            ..Default::default()
        }
    }

    /// Reject configurations the pipeline cannot honour
    pub fn validate(&self) -> GestureResult<()> {
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity must be at least 1"));
        }
        if self.min_samples == 0 || self.min_samples > self.history_capacity {
            return Err(invalid(format!(
                "min_samples must be in 1..={}, got {}",
                self.history_capacity, self.min_samples
            )));
        }
        if !(self.majority_threshold > 0.0 && self.majority_threshold <= 1.0) {
            return Err(invalid(format!(
                "majority_threshold must be in (0, 1], got {}",
                self.majority_threshold
            )));
        }
        if !(self.thumb.down < self.thumb.up) {
            return Err(invalid(format!(
                "thumb.down ({}) must be below thumb.up ({})",
                self.thumb.down, self.thumb.up
            )));
        }
        let non_negative = [
            ("thumb.side", self.thumb.side),
            ("fist.palm_x", self.fist.palm_x),
            ("fist.palm_y", self.fist.palm_y),
            ("fist.vertical", self.fist.vertical),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> GestureError {
    GestureError::InvalidConfig(reason.into())
}

/// Serde adapter writing durations in humantime form ("1s", "250ms")
pub mod duration_format {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}
