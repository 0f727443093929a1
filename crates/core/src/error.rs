//! Error types for the engine.
//!
//! Only two things can fail in a way callers must handle: building a shape from
//! untrusted data, and selecting or registering word sets. Everything else (illegal
//! moves, keys with no meaning in the current phase) is a silent no-op.

use std::fmt;

use crate::types::MAX_SHAPE_CELLS;

/// Malformed shape data. No piece is ever built from a shape that fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The JSON text did not parse.
    Json(String),
    /// The shape value is not an array of cells.
    NotAnArray,
    /// The shape has no cells.
    Empty,
    /// More cells than any archetype has.
    TooManyCells(usize),
    /// Element `index` is not a pair of integers.
    InvalidCell { index: usize },
    /// Element `index` does not fit a cell offset.
    OffsetOutOfRange { index: usize },
    /// Element `index` repeats an earlier cell.
    DuplicateCell { index: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Json(e) => write!(f, "invalid shape json: {e}"),
            ShapeError::NotAnArray => write!(f, "shape must be an array of [dx, dy] pairs"),
            ShapeError::Empty => write!(f, "shape has no cells"),
            ShapeError::TooManyCells(n) => {
                write!(f, "shape has {n} cells (max {MAX_SHAPE_CELLS})")
            }
            ShapeError::InvalidCell { index } => {
                write!(f, "shape element {index} is not an integer pair")
            }
            ShapeError::OffsetOutOfRange { index } => {
                write!(f, "shape element {index} is out of range")
            }
            ShapeError::DuplicateCell { index } => {
                write!(f, "shape element {index} duplicates another cell")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Word-set lookups and registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSetError {
    /// No set with this name is registered.
    UnknownSet(String),
    /// Registration with an empty name.
    EmptyName,
    /// Registration of a set without any usable word.
    EmptySet(String),
    /// A word-set document could not be parsed.
    Json(String),
}

impl fmt::Display for WordSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordSetError::UnknownSet(name) => write!(f, "unknown word set: {name}"),
            WordSetError::EmptyName => write!(f, "word set name is required"),
            WordSetError::EmptySet(name) => write!(f, "word set {name} has no words"),
            WordSetError::Json(e) => write!(f, "invalid word set json: {e}"),
        }
    }
}

impl std::error::Error for WordSetError {}
