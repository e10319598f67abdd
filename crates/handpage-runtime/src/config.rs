//! Runtime configuration

use std::path::Path;
use std::time::Duration;

use handpage_gesture::{duration_format, GestureConfig};
use handpage_reader::ReaderSettings;
use serde::{Deserialize, Serialize};

use crate::{LogFormat, RuntimeError, RuntimeResult};

/// Gesture runtime configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Delay between two frame polls
    #[serde(with = "duration_format")]
    pub poll_interval: Duration,
    /// Tracker confidence below which a hand counts as absent
    pub min_confidence: f32,
    /// Pipeline constants and action table
    pub gesture: GestureConfig,
    /// Initial reader settings
    pub reader: ReaderSettings,
    pub log_format: LogFormat,
    /// `tracing` filter directives; `RUST_LOG` applies when unset
    pub log_filter: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            poll_interval: Duration::from_millis(30),
            min_confidence: 0.7,
            gesture: GestureConfig::default(),
            reader: ReaderSettings::default(),
            log_format: LogFormat::default(),
            log_filter: None,
        }
    }
}

impl RuntimeConfig {
    /// Default runtime around the responsive gesture preset
    pub fn responsive() -> Self {
        RuntimeConfig {
            gesture: GestureConfig::responsive(),
            ..Default::default()
        }
    }

    /// Default runtime around the steady gesture preset
    pub fn steady() -> Self {
        RuntimeConfig {
            gesture: GestureConfig::steady(),
            ..Default::default()
        }
    }

    /// Parse and validate JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> RuntimeResult<Self> {
        let config: RuntimeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> RuntimeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> RuntimeResult<()> {
        if self.poll_interval.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "poll_interval must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(RuntimeError::InvalidConfig(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        self.gesture.validate()?;
        Ok(())
    }
}
