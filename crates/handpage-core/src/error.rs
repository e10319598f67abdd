//! Error types for Handpage core types

use thiserror::Error;

/// Core Handpage errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandpageError {
    #[error("Wrong landmark count: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Unknown gesture: {0}")]
    UnknownGesture(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Result type for core operations
pub type HandpageResult<T> = Result<T, HandpageError>;
