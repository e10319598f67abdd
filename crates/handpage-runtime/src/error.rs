//! Error types for the gesture runtime

use handpage_core::HandpageError;
use handpage_gesture::GestureError;
use thiserror::Error;

/// Runtime errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid runtime config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Gesture(#[from] GestureError),

    #[error(transparent)]
    Landmarks(#[from] HandpageError),

    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Tracing setup failed: {0}")]
    Telemetry(String),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
