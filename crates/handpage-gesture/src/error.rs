//! Error types for gesture recognition

use thiserror::Error;

/// Gesture pipeline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("Invalid gesture config: {0}")]
    InvalidConfig(String),
}

/// Result type for gesture operations
pub type GestureResult<T> = Result<T, GestureError>;
