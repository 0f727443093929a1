//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget/layout
//! libraries and renders into a plain framebuffer that is flushed to the terminal.
//!
//! - [`GameView`] turns a [`core::GameSnapshot`] and a [`Feedback`] feed into a frame
//! - [`Feedback`] keeps the short-lived score delta and bonus messages, fed by events
//! - [`TerminalRenderer`] diffs consecutive frames and writes only what changed

pub mod fb;
pub mod feedback;
pub mod game_view;
pub mod renderer;

pub use typefall_core as core;
pub use typefall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use feedback::{BonusEntry, Feedback, ScoreDelta};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, ChangedSpans, Span, TerminalRenderer};
