//! Scoring module - line clears, drop bonus, word completion and rank
//!
//! All increments are non-negative, so the session score only ever grows. Each rule
//! returns the amount to add; the session does the bookkeeping and reports the delta with
//! its [`ScoreSource`].

use crate::types::{
    ScoreSource, DROP_BONUS_CAP, HARD_DROP_BONUS, LINE_CLEAR_BASE, LINE_CLEAR_BONUS,
    SOFT_DROP_BONUS,
};

/// Bonus message shown when a look-ahead (slot 1) word is completed.
pub const MEMORY_BONUS_MESSAGE: &str = "MEMORY BONUS!! x2";

/// Bonus message shown when a word is completed without a mistake.
pub const NO_MISS_MESSAGE: &str = "NO MISS!! x2";

/// Multi-line bonus for `lines` cleared at once.
pub fn line_clear_bonus(lines: usize) -> u32 {
    LINE_CLEAR_BONUS[lines.min(LINE_CLEAR_BONUS.len() - 1)]
}

/// Points for clearing `lines` rows in one lock: `lines * 100 + bonus`.
///
/// ```
/// use typefall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 100);
/// assert_eq!(line_clear_score(2), 250);
/// assert_eq!(line_clear_score(4), 550);
/// ```
pub fn line_clear_score(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    (lines as u32)
        .saturating_mul(LINE_CLEAR_BASE)
        .saturating_add(line_clear_bonus(lines))
}

/// Per-piece drop bonus level.
///
/// The level only ever rises while one piece is active and is capped at 20. Requests of
/// 20 or more jump straight to the cap; requests of 10..20 raise the level to at least 10;
/// smaller requests add up. Only the strict increase is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropBonus {
    level: u32,
}

impl DropBonus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Request `amount` of bonus; returns the points gained.
    pub fn apply(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let target = if amount >= DROP_BONUS_CAP {
            DROP_BONUS_CAP
        } else if amount >= SOFT_DROP_BONUS {
            self.level.max(SOFT_DROP_BONUS)
        } else {
            (self.level + amount).min(DROP_BONUS_CAP)
        };

        if target <= self.level {
            return 0;
        }
        let gained = target - self.level;
        self.level = target;
        gained
    }

    pub fn soft_drop(&mut self) -> u32 {
        self.apply(SOFT_DROP_BONUS)
    }

    pub fn hard_drop(&mut self) -> u32 {
        self.apply(HARD_DROP_BONUS)
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }
}

/// Result of completing a preview word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionBonus {
    pub total: u32,
    /// Slot 1 was completed (look-ahead bonus applied).
    pub memory: bool,
    /// No rejected keystroke during the attempt.
    pub no_miss: bool,
}

impl CompletionBonus {
    /// Source tag for the score delta.
    pub fn source(&self, slot: usize) -> ScoreSource {
        if slot == 1 {
            ScoreSource::Memory
        } else {
            ScoreSource::Type
        }
    }
}

/// Word completion bonus.
///
/// Base is the number of characters typed in the attempt. Completing slot 1 adds the base
/// again; a clean attempt adds `typed` (slot 0) or `2 * typed` (slot 1). Nothing is
/// awarded or flagged when no characters were typed.
pub fn completion_bonus(typed: u32, slot: usize, had_mistake: bool) -> CompletionBonus {
    if typed == 0 {
        return CompletionBonus::default();
    }

    let mut bonus = CompletionBonus {
        total: typed,
        ..CompletionBonus::default()
    };
    if slot == 1 {
        bonus.total += typed;
        bonus.memory = true;
    }
    if !had_mistake {
        let multiplier = if slot == 1 { 2 } else { 1 };
        bonus.total += typed * multiplier;
        bonus.no_miss = true;
    }
    bonus
}

/// Result-screen rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    D,
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
            Rank::SSS => "SSS",
        }
    }
}

pub fn rank_for(score: u32) -> Rank {
    match score {
        2000.. => Rank::SSS,
        1500.. => Rank::SS,
        1000.. => Rank::S,
        800.. => Rank::A,
        600.. => Rank::B,
        400.. => Rank::C,
        _ => Rank::D,
    }
}

/// Feed text for a line clear, `None` for zero lines.
pub fn line_clear_message(lines: usize) -> Option<String> {
    match lines {
        0 => None,
        1 => Some(format!("LINE CLEAR!! +{LINE_CLEAR_BASE}")),
        n => {
            let base = n as u32 * LINE_CLEAR_BASE;
            match line_clear_bonus(n) {
                0 => Some(format!("{n} LINES!! {base}")),
                bonus => Some(format!("{n} LINES!! {base}+{bonus}")),
            }
        }
    }
}

/// Feed text for a soft drop; shown only for gains of at least 10.
pub fn soft_drop_message(gained: u32) -> Option<String> {
    (gained >= SOFT_DROP_BONUS).then(|| format!("SOFT DROP!! +{gained}"))
}

/// Feed text for a hard drop; `total` is the drop level after the drop.
pub fn hard_drop_message(gained: u32, total: u32) -> Option<String> {
    (gained > 0).then(|| format!("HARD DROP!! +{gained} ({total})"))
}
