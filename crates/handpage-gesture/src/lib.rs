//! Handpage Gesture - from hand landmarks to debounced reader commands
//!
//! Per frame, data flows one way through four stages:
//!
//! ```text
//! landmarks → analyzer → classifier → stabilizer → gate → handler
//! ```
//!
//! - `analyzer`: finger extension flags and thumb orientation
//! - `classifier`: priority-ordered match against the gesture vocabulary
//! - `stabilizer`: majority vote over a bounded history window
//! - `gate`: cooldown and repeat suppression before the action callback
//!
//! `GesturePipeline` owns all per-session state. It is not reentrant: feed it
//! one frame at a time, and wrap it in a lock if several threads need it.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod stabilizer;

#[cfg(test)]
mod testutil;

pub use analyzer::*;
pub use classifier::*;
pub use config::*;
pub use error::*;
pub use gate::*;
pub use pipeline::*;
pub use stabilizer::*;
