//! Handpage Time - clock sources for the gesture pipeline
//!
//! This crate implements:
//! - `Clock`: the timestamp source consumed by the dispatch cooldown
//! - `MonotonicClock`: wall-independent, anchored to `std::time::Instant`
//! - `ManualClock`: shared, explicitly advanced (tests and replays)

pub mod clock;

pub use clock::*;
