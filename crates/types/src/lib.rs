//! Shared types and constants for the typing block game.
//!
//! Everything here is plain data with no behaviour beyond parsing and naming, so it can
//! be used by the core engine, the terminal renderer and the input mapper alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (3, -1); every archetype's cells sit at `dy >= 1`, so a freshly
//!   spawned piece occupies row 0 and below.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop timestep (~60 FPS) |
//! | `GRAVITY_MS` | 500 | One row of gravity while a piece falls |
//! | `COUNTDOWN_MS` | 1000 | One second of the session clock |
//! | `INITIAL_TIME_SECS` | 100 | Session length |
//!
//! # Examples
//!
//! ```
//! use typefall_types::{Archetype, GameAction, Phase, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Archetype::from_str("t"), Some(Archetype::T));
//! assert_eq!(Archetype::from_str("4"), Some(Archetype::Four));
//! assert_eq!(Archetype::Four.as_str(), "4");
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Phase::Typing.as_str(), "typing");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of pending pieces in the preview queue.
pub const PREVIEW_COUNT: usize = 2;

/// Largest archetype (U) has five cells.
pub const MAX_SHAPE_CELLS: usize = 5;

/// Spawn anchor column.
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row (above the visible board).
pub const SPAWN_Y: i8 = -1;

/// Host loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity period while a piece is falling.
pub const GRAVITY_MS: u32 = 500;

/// Countdown period (one second of session time).
pub const COUNTDOWN_MS: u32 = 1000;

/// Session length in seconds.
pub const INITIAL_TIME_SECS: u32 = 100;

/// Anchor-x offsets tried, in order, when a rotation does not fit in place.
pub const KICK_OFFSETS: [i8; 4] = [-1, 1, -2, 2];

/// Points per cleared line.
pub const LINE_CLEAR_BASE: u32 = 100;

/// Extra points by lines cleared at once (index 4 also covers anything larger).
pub const LINE_CLEAR_BONUS: [u32; 5] = [0, 0, 50, 100, 150];

/// Drop bonus requested per soft-dropped row.
pub const SOFT_DROP_BONUS: u32 = 10;

/// Drop bonus requested by a hard drop.
pub const HARD_DROP_BONUS: u32 = 20;

/// Cap on the per-piece drop bonus level.
pub const DROP_BONUS_CAP: u32 = 20;

/// Word used for every archetype when a word list is empty.
pub const PLACEHOLDER_WORD: &str = "xxxxx";

/// Word set selected when nothing else is configured.
pub const DEFAULT_WORD_SET: &str = "numbers";

/// Maximum number of bonus messages visible at once.
pub const BONUS_MESSAGE_LIMIT: usize = 4;

/// Lifetime of a bonus message in the feedback feed.
pub const BONUS_MESSAGE_LIFETIME_MS: u32 = 2600;

/// Lifetime of the transient score delta.
pub const SCORE_DELTA_LIFETIME_MS: u32 = 1200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(GRAVITY_MS, 500);
        assert_eq!(COUNTDOWN_MS, 1000);
        assert_eq!(INITIAL_TIME_SECS, 100);
        assert_eq!(TICK_MS, 16);
    }

    #[test]
    fn archetype_names_roundtrip() {
        for kind in Archetype::ALL {
            assert_eq!(Archetype::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(Archetype::from_str("x"), None);
    }

    #[test]
    fn reverse_rotation_table_is_literal() {
        let reversed: Vec<&str> = Archetype::ALL
            .iter()
            .filter(|k| k.reverse_rotation())
            .map(|k| k.as_str())
            .collect();
        assert_eq!(reversed, vec!["2", "4", "L", "J", "T", "U", "V"]);
    }

    #[test]
    fn type_char_action_parses_single_chars_only() {
        assert_eq!(GameAction::from_str("a"), Some(GameAction::TypeChar('a')));
        assert_eq!(GameAction::from_str("moveleft"), Some(GameAction::MoveLeft));
        assert_eq!(GameAction::from_str(""), None);
    }
}

/// The twelve piece archetypes.
///
/// Names follow the cells they draw: `1`..`4` are straight pieces of that length, the
/// letters are the familiar shapes (`U` has five cells, `V` three).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Archetype {
    #[cfg_attr(feature = "serde", serde(rename = "1"))]
    One,
    #[cfg_attr(feature = "serde", serde(rename = "2"))]
    Two,
    #[cfg_attr(feature = "serde", serde(rename = "3"))]
    Three,
    #[cfg_attr(feature = "serde", serde(rename = "4"))]
    Four,
    L,
    J,
    Z,
    S,
    T,
    U,
    O,
    V,
}

impl Archetype {
    /// All archetypes in their canonical (word map) order.
    pub const ALL: [Archetype; 12] = [
        Archetype::One,
        Archetype::Two,
        Archetype::Three,
        Archetype::Four,
        Archetype::L,
        Archetype::J,
        Archetype::Z,
        Archetype::S,
        Archetype::T,
        Archetype::U,
        Archetype::O,
        Archetype::V,
    ];

    /// Parse an archetype name (case-insensitive).
    ///
    /// ```
    /// use typefall_types::Archetype;
    ///
    /// assert_eq!(Archetype::from_str("1"), Some(Archetype::One));
    /// assert_eq!(Archetype::from_str("u"), Some(Archetype::U));
    /// assert_eq!(Archetype::from_str("I"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "1" => Some(Archetype::One),
            "2" => Some(Archetype::Two),
            "3" => Some(Archetype::Three),
            "4" => Some(Archetype::Four),
            "L" => Some(Archetype::L),
            "J" => Some(Archetype::J),
            "Z" => Some(Archetype::Z),
            "S" => Some(Archetype::S),
            "T" => Some(Archetype::T),
            "U" => Some(Archetype::U),
            "O" => Some(Archetype::O),
            "V" => Some(Archetype::V),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::One => "1",
            Archetype::Two => "2",
            Archetype::Three => "3",
            Archetype::Four => "4",
            Archetype::L => "L",
            Archetype::J => "J",
            Archetype::Z => "Z",
            Archetype::S => "S",
            Archetype::T => "T",
            Archetype::U => "U",
            Archetype::O => "O",
            Archetype::V => "V",
        }
    }

    /// Position in [`Archetype::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this archetype rotates with the flipped sense.
    ///
    /// This is a fixed lookup, not a geometric property. Keep it exactly as is.
    pub fn reverse_rotation(&self) -> bool {
        matches!(
            self,
            Archetype::Two
                | Archetype::Four
                | Archetype::T
                | Archetype::U
                | Archetype::V
                | Archetype::J
                | Archetype::L
        )
    }
}

/// Rotation sense passed to the rotation formula (+1 / -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationDir {
    Negative,
    Positive,
}

impl RotationDir {
    pub fn sign(&self) -> i8 {
        match self {
            RotationDir::Negative => -1,
            RotationDir::Positive => 1,
        }
    }
}

/// Logical input actions understood by the session.
///
/// The mapping from physical keys lives in the input crate and depends on the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    /// A printable character typed toward a preview word
    TypeChar(char),
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate with the negative sense (clockwise on screen for non-reversed archetypes)
    RotateCw,
    /// Rotate with the positive sense
    RotateCcw,
    /// Drop piece one cell down (drop bonus 10)
    SoftDrop,
    /// Drop to the lowest legal row and lock (drop bonus 20)
    HardDrop,
    /// Leave the start screen and begin a session
    Start,
    /// Full reset back to the start screen
    Escape,
    /// Select the previous word set on the start screen
    CycleWordSetLeft,
    /// Select the next word set on the start screen
    CycleWordSetRight,
}

impl GameAction {
    /// Parse an action name. A single character parses as [`GameAction::TypeChar`].
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(GameAction::TypeChar(c));
        }
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "start" => Some(GameAction::Start),
            "escape" => Some(GameAction::Escape),
            "cyclewordsetleft" => Some(GameAction::CycleWordSetLeft),
            "cyclewordsetright" => Some(GameAction::CycleWordSetRight),
            _ => None,
        }
    }

    /// camelCase name (used in logs). `TypeChar` reports its category only.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::TypeChar(_) => "typeChar",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Start => "start",
            GameAction::Escape => "escape",
            GameAction::CycleWordSetLeft => "cycleWordSetLeft",
            GameAction::CycleWordSetRight => "cycleWordSetRight",
        }
    }
}

/// Session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    /// Idle; word-set selection is possible
    StartScreen,
    /// Waiting for a preview word to be typed
    Typing,
    /// A piece is active and gravity is running
    Falling,
    /// Terminal until escape
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::StartScreen => "startScreen",
            Phase::Typing => "typing",
            Phase::Falling => "falling",
            Phase::GameOver => "gameOver",
        }
    }

    /// Whether the session clock runs in this phase.
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Typing | Phase::Falling)
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum GameOverReason {
    TimeUp,
    BlockedSpawn,
}

/// Source tag attached to score increments and bonus messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ScoreSource {
    Line,
    Drop,
    Type,
    Memory,
}

impl ScoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSource::Line => "line",
            ScoreSource::Drop => "drop",
            ScoreSource::Type => "type",
            ScoreSource::Memory => "memory",
        }
    }
}

/// A board cell: `None` when empty, otherwise the archetype that locked there.
pub type Cell = Option<Archetype>;
