//! Transient feedback shown next to the board: the latest score delta and a short feed
//! of bonus messages.
//!
//! Both are driven by [`GameEvent`]s and aged by the host loop's elapsed time, so the
//! view stays a pure function of snapshot plus feedback.

use std::collections::VecDeque;

use crate::core::GameEvent;
use crate::types::{
    Phase, ScoreSource, BONUS_MESSAGE_LIFETIME_MS, BONUS_MESSAGE_LIMIT, SCORE_DELTA_LIFETIME_MS,
};

/// Bonus entries start fading this long before they expire.
const FADE_MS: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusEntry {
    pub text: String,
    pub variant: ScoreSource,
    age_ms: u32,
}

impl BonusEntry {
    pub fn age_ms(&self) -> u32 {
        self.age_ms
    }

    pub fn is_fading(&self) -> bool {
        self.age_ms >= BONUS_MESSAGE_LIFETIME_MS.saturating_sub(FADE_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDelta {
    pub amount: u32,
    pub source: ScoreSource,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Feedback {
    bonuses: VecDeque<BonusEntry>,
    delta: Option<ScoreDelta>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first.
    pub fn bonuses(&self) -> impl Iterator<Item = &BonusEntry> {
        self.bonuses.iter()
    }

    pub fn delta(&self) -> Option<ScoreDelta> {
        self.delta
    }

    pub fn push_bonus(&mut self, text: impl Into<String>, variant: ScoreSource) {
        self.bonuses.push_back(BonusEntry {
            text: text.into(),
            variant,
            age_ms: 0,
        });
        while self.bonuses.len() > BONUS_MESSAGE_LIMIT {
            self.bonuses.pop_front();
        }
    }

    /// A new delta replaces the previous one and restarts its timer.
    pub fn show_delta(&mut self, amount: u32, source: ScoreSource) {
        if amount == 0 {
            return;
        }
        self.delta = Some(ScoreDelta {
            amount,
            source,
            remaining_ms: SCORE_DELTA_LIFETIME_MS,
        });
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ScoreDelta { amount, source } => self.show_delta(*amount, *source),
            GameEvent::BonusMessage { text, variant } => self.push_bonus(text.clone(), *variant),
            GameEvent::PhaseChanged {
                phase: Phase::StartScreen,
            } => self.clear(),
            _ => {}
        }
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        for entry in self.bonuses.iter_mut() {
            entry.age_ms = entry.age_ms.saturating_add(elapsed_ms);
        }
        self.bonuses
            .retain(|entry| entry.age_ms < BONUS_MESSAGE_LIFETIME_MS);

        if let Some(delta) = self.delta.as_mut() {
            delta.remaining_ms = delta.remaining_ms.saturating_sub(elapsed_ms);
            if delta.remaining_ms == 0 {
                self.delta = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.bonuses.clear();
        self.delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_keeps_newest_four() {
        let mut feed = Feedback::new();
        for i in 0..6 {
            feed.push_bonus(format!("msg {i}"), ScoreSource::Line);
        }
        let texts: Vec<&str> = feed.bonuses().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["msg 2", "msg 3", "msg 4", "msg 5"]);
    }

    #[test]
    fn test_bonus_fades_then_expires() {
        let mut feed = Feedback::new();
        feed.push_bonus("LINE CLEAR!! +100", ScoreSource::Line);

        feed.advance(2100);
        assert!(!feed.bonuses().next().unwrap().is_fading());
        feed.advance(200);
        assert!(feed.bonuses().next().unwrap().is_fading());
        feed.advance(300);
        assert_eq!(feed.bonuses().count(), 0);
    }

    #[test]
    fn test_delta_replaced_and_expires() {
        let mut feed = Feedback::new();
        feed.apply(&GameEvent::ScoreDelta {
            amount: 10,
            source: ScoreSource::Drop,
        });
        feed.advance(1000);
        feed.apply(&GameEvent::ScoreDelta {
            amount: 30,
            source: ScoreSource::Type,
        });
        feed.advance(1000);
        assert_eq!(feed.delta().map(|d| d.amount), Some(30));
        feed.advance(200);
        assert_eq!(feed.delta(), None);
    }

    #[test]
    fn test_zero_delta_ignored() {
        let mut feed = Feedback::new();
        feed.show_delta(0, ScoreSource::Line);
        assert_eq!(feed.delta(), None);
    }

    #[test]
    fn test_reset_to_start_screen_clears() {
        let mut feed = Feedback::new();
        feed.apply(&GameEvent::BonusMessage {
            text: "NO MISS!! x2".to_string(),
            variant: ScoreSource::Type,
        });
        feed.apply(&GameEvent::PhaseChanged {
            phase: Phase::StartScreen,
        });
        assert_eq!(feed.bonuses().count(), 0);
    }
}
