//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] depending on the current
//! [`crate::types::Phase`]. Terminal auto-repeat is left to the terminal: every press is
//! one action.

pub mod map;

pub use typefall_types as types;

pub use map::{handle_key_event, should_quit};
