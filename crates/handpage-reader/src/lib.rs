//! Handpage Reader - what a dispatched action does to the reading view
//!
//! - `settings`: font size, line spacing and narration rate with bounded steps
//! - `narrator`: the speech black box (`Narrator`) and an in-memory stand-in
//! - `session`: page position plus settings plus narrator, driven by `Action`
//!
//! Rendering, theming, pagination and file loading live outside this crate;
//! a session starts from already paginated text.

pub mod narrator;
pub mod session;
pub mod settings;

pub use narrator::*;
pub use session::*;
pub use settings::*;
