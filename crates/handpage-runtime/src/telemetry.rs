//! Logging setup

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{RuntimeError, RuntimeResult};

/// Filter used when neither an explicit filter nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(RuntimeError::InvalidConfig(format!("unknown log format: {other}"))),
        }
    }
}

/// Build the event filter: explicit directives, else `RUST_LOG`, else `info`
pub fn env_filter(filter: Option<&str>) -> RuntimeResult<EnvFilter> {
    match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| RuntimeError::Telemetry(format!("bad filter {directives:?}: {e}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Install the global `tracing` subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(format: LogFormat, filter: Option<&str>) -> RuntimeResult<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(filter)?);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| RuntimeError::Telemetry(e.to_string()))
}
