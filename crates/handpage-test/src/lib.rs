//! Handpage Test Harness - synthetic input and end-to-end runs
//!
//! This crate provides:
//! - Canonical and parameterised hand poses
//! - Seeded jitter, dropouts and low-confidence frames over a pose script
//! - Scripted pipeline scenarios on a manual clock
//! - End-to-end reading sessions through controller, channel and reader

pub mod integration;
pub mod jitter;
pub mod pose;
pub mod scenario;

pub use integration::*;
pub use jitter::*;
pub use pose::*;
pub use scenario::*;
