//! Handpage Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout Handpage:
//! - Hand landmarks (HandLandmark, Landmark, LandmarkSet, HandFrame)
//! - Gesture vocabulary (GestureLabel, ThumbOrientation, FingerStates)
//! - Reader actions and the gesture → action table
//! - Time primitives (Timestamp)

pub mod action;
pub mod error;
pub mod gesture;
pub mod landmark;
pub mod time;

pub use action::*;
pub use error::*;
pub use gesture::*;
pub use landmark::*;
pub use time::*;
