//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all game rules and state for the typing block game. It has no
//! terminal, clock or file I/O of its own: the host feeds it actions and elapsed time, and
//! reads back events and snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with collision queries, locking and line clears
//! - [`shapes`]: the twelve archetypes, pivot rotation and wall kicks
//! - [`words`]: word entries, the word-set registry and the per-session word map
//! - [`queue`]: the two-slot preview queue and typing buffer
//! - [`scoring`]: line, drop and completion bonuses, rank
//! - [`session`]: the state machine tying everything together
//! - [`timer`], [`events`], [`snapshot`], [`config`], [`error`], [`rng`]: supporting pieces
//!
//! # Game Rules
//!
//! - Two upcoming pieces are shown, each with a word. Typing a word claims its piece,
//!   which then spawns at the top and falls every 500ms.
//! - Completing the second (look-ahead) word doubles the typing bonus; a clean attempt
//!   adds another bonus on top.
//! - Soft and hard drops earn a per-piece drop bonus capped at 20.
//! - Full rows clear for `lines * 100` plus a multi-line bonus.
//! - The session lasts 100 seconds or until a piece cannot spawn.
//!
//! # Example
//!
//! ```
//! use typefall_core::{Session, SessionConfig};
//! use typefall_types::{GameAction, Phase};
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(7));
//! session.handle(GameAction::Start);
//! assert_eq!(session.phase(), Phase::Typing);
//!
//! // Type the first preview word to claim its piece.
//! let word = session.queue().entries()[0].word.key().to_string();
//! for c in word.chars() {
//!     session.handle(GameAction::TypeChar(c));
//! }
//! assert_eq!(session.phase(), Phase::Falling);
//! assert!(session.score() > 0);
//!
//! session.handle(GameAction::HardDrop);
//! assert_eq!(session.phase(), Phase::Typing);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) every frame with the elapsed time (the
//! binary uses a fixed 16ms step). Gravity runs only while a piece falls; the countdown
//! runs while typing or falling.

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod timer;
pub mod words;

pub use typefall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::SessionConfig;
pub use error::{ShapeError, WordSetError};
pub use events::{EventSink, GameEvent};
pub use queue::{Highlight, PreviewEntry, TypeOutcome, WordQueue};
pub use rng::SimpleRng;
pub use scoring::{completion_bonus, line_clear_score, rank_for, DropBonus, Rank};
pub use session::{Piece, Session};
pub use shapes::{rotate, template, try_rotate, Pivot, Shape, Template};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timer::PeriodicTimer;
pub use words::{build_word_map, WordEntry, WordMap, WordSets};
