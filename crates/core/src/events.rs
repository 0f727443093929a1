//! Structured events emitted by the session for presentation collaborators.
//!
//! The session never draws anything. Every visible change is recorded as a
//! [`GameEvent`]; hosts drain them after each action or tick and forward them to a
//! renderer, a log, or both.

use serde::Serialize;

use crate::board::Occupancy;
use crate::queue::{Highlight, PreviewEntry};
use crate::snapshot::ActiveSnapshot;
use crate::types::{GameOverReason, Phase, ScoreSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    BoardChanged {
        occupancy: Occupancy,
    },
    PieceChanged {
        piece: Option<ActiveSnapshot>,
    },
    /// Rows removed by one lock, in pre-clear coordinates, bottom to top.
    RowsCleared {
        rows: Vec<usize>,
    },
    ScoreChanged {
        total: u32,
    },
    ScoreDelta {
        amount: u32,
        source: ScoreSource,
    },
    BonusMessage {
        text: String,
        variant: ScoreSource,
    },
    TimerChanged {
        seconds: u32,
    },
    PreviewChanged {
        entries: Vec<PreviewEntry>,
        highlight: Option<Highlight>,
    },
    Message {
        text: String,
    },
    ClearMessage,
    PhaseChanged {
        phase: Phase,
    },
    WordSetChanged {
        name: String,
    },
    GameOver {
        reason: GameOverReason,
        score: u32,
        rank: &'static str,
    },
}

impl GameEvent {
    /// Short name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::BoardChanged { .. } => "boardChanged",
            GameEvent::PieceChanged { .. } => "pieceChanged",
            GameEvent::RowsCleared { .. } => "rowsCleared",
            GameEvent::ScoreChanged { .. } => "scoreChanged",
            GameEvent::ScoreDelta { .. } => "scoreDelta",
            GameEvent::BonusMessage { .. } => "bonusMessage",
            GameEvent::TimerChanged { .. } => "timerChanged",
            GameEvent::PreviewChanged { .. } => "previewChanged",
            GameEvent::Message { .. } => "message",
            GameEvent::ClearMessage => "clearMessage",
            GameEvent::PhaseChanged { .. } => "phaseChanged",
            GameEvent::WordSetChanged { .. } => "wordSetChanged",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

/// Receiver for session events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
