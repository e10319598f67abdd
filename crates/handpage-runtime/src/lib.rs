//! Handpage Runtime - drives a gesture pipeline from a frame source
//!
//! - `source`: `FrameSource` trait, tracker observations, replay of recordings
//! - `handler`: channel handoff of dispatched commands to the UI context
//! - `controller`: polling loop around a shared `GesturePipeline`
//! - `config`: JSON runtime configuration
//! - `telemetry`: `tracing` subscriber setup

pub mod config;
pub mod controller;
pub mod error;
pub mod handler;
pub mod source;
pub mod telemetry;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use handler::*;
pub use source::*;
pub use telemetry::*;
