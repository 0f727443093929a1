use arrayvec::ArrayVec;
use serde::Serialize;

use crate::queue::{Highlight, PreviewEntry};
use crate::scoring::Rank;
use crate::session::Piece;
use crate::shapes::Shape;
use crate::types::{
    Archetype, Cell, GameOverReason, Phase, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_COUNT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: Archetype,
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
    pub color: &'static str,
}

impl ActiveSnapshot {
    /// Absolute board coordinates of every cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .iter()
            .map(move |&(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            shape: piece.shape.clone(),
            color: piece.color,
        }
    }
}

pub type BoardCells = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: BoardCells,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub time_left: u32,
    pub drop_bonus: u32,
    pub preview: ArrayVec<PreviewEntry, PREVIEW_COUNT>,
    pub highlight: Option<Highlight>,
    pub buffer: String,
    pub message: Option<String>,
    pub word_set: String,
    pub word_set_label: String,
    pub difficulty: &'static str,
    pub game_over: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.phase = Phase::StartScreen;
        self.score = 0;
        self.time_left = 0;
        self.drop_bonus = 0;
        self.preview.clear();
        self.highlight = None;
        self.buffer.clear();
        self.message = None;
        self.word_set.clear();
        self.word_set_label.clear();
        self.difficulty = "";
        self.game_over = None;
    }

    pub fn playable(&self) -> bool {
        self.phase.is_running()
    }

    pub fn rank(&self) -> Rank {
        crate::scoring::rank_for(self.score)
    }

    /// Locked cell at (x, y); out-of-range reads are empty.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            phase: Phase::StartScreen,
            score: 0,
            time_left: 0,
            drop_bonus: 0,
            preview: ArrayVec::new(),
            highlight: None,
            buffer: String::new(),
            message: None,
            word_set: String::new(),
            word_set_label: String::new(),
            difficulty: "",
            game_over: None,
        }
    }
}
