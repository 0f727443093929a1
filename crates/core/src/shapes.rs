//! Shapes module - archetype templates, pivot rotation and wall kicks
//!
//! Every archetype is a small set of cell offsets relative to the piece anchor plus a
//! pivot. Rotation turns each cell 90° around the pivot; which way `+1`/`-1` turns
//! depends on a fixed per-archetype table (see [`Archetype::reverse_rotation`]).
//!
//! Pivots are stored doubled (`x2 = 2 * cx`) so the `O` piece, whose centre is
//! `(1.5, 1.5)`, rotates with exact integer arithmetic.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::types::{Archetype, RotationDir, KICK_OFFSETS, MAX_SHAPE_CELLS};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// A validated piece shape (1..=5 distinct cells).
///
/// Serializes as `[[dx, dy], ...]`; deserializing goes through [`Shape::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "Vec<CellOffset>")]
pub struct Shape {
    cells: ArrayVec<CellOffset, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Build a shape from raw offsets.
    ///
    /// ```
    /// use typefall_core::shapes::Shape;
    /// use typefall_core::error::ShapeError;
    ///
    /// assert_eq!(Shape::new(&[(0, 0), (1, 0)]).unwrap().len(), 2);
    /// assert_eq!(Shape::new(&[]), Err(ShapeError::Empty));
    /// ```
    pub fn new(offsets: &[(i32, i32)]) -> Result<Self, ShapeError> {
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        if offsets.len() > MAX_SHAPE_CELLS {
            return Err(ShapeError::TooManyCells(offsets.len()));
        }

        let mut cells = ArrayVec::new();
        for (index, &(dx, dy)) in offsets.iter().enumerate() {
            let (Ok(dx), Ok(dy)) = (i8::try_from(dx), i8::try_from(dy)) else {
                return Err(ShapeError::OffsetOutOfRange { index });
            };
            if cells.contains(&(dx, dy)) {
                return Err(ShapeError::DuplicateCell { index });
            }
            cells.push((dx, dy));
        }
        Ok(Self { cells })
    }

    /// Parse shape data such as `[[1, 1], [2, 1]]`.
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ShapeError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate an already parsed JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ShapeError> {
        let items = value.as_array().ok_or(ShapeError::NotAnArray)?;
        let mut offsets = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let pair = match item.as_array() {
                Some(pair) if pair.len() == 2 => pair,
                _ => return Err(ShapeError::InvalidCell { index }),
            };
            let (Some(dx), Some(dy)) = (pair[0].as_i64(), pair[1].as_i64()) else {
                return Err(ShapeError::InvalidCell { index });
            };
            let (Ok(dx), Ok(dy)) = (i32::try_from(dx), i32::try_from(dy)) else {
                return Err(ShapeError::OffsetOutOfRange { index });
            };
            offsets.push((dx, dy));
        }
        Self::new(&offsets)
    }

    pub fn cells(&self) -> &[CellOffset] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box as `(min_x, max_x, min_y, max_y)`.
    pub fn bounds(&self) -> (i8, i8, i8, i8) {
        self.cells.iter().fold(
            (i8::MAX, i8::MIN, i8::MAX, i8::MIN),
            |(min_x, max_x, min_y, max_y), &(x, y)| {
                (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
            },
        )
    }

    /// Same cells regardless of order.
    pub fn same_cells(&self, other: &Shape) -> bool {
        self.len() == other.len() && self.cells.iter().all(|c| other.cells.contains(c))
    }
}

impl TryFrom<serde_json::Value> for Shape {
    type Error = ShapeError;

    fn try_from(value: serde_json::Value) -> Result<Self, ShapeError> {
        Self::from_value(&value)
    }
}

impl From<Shape> for Vec<CellOffset> {
    fn from(shape: Shape) -> Self {
        shape.cells.to_vec()
    }
}

impl AsRef<[CellOffset]> for Shape {
    fn as_ref(&self) -> &[CellOffset] {
        &self.cells
    }
}

/// Rotation centre in doubled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pivot {
    pub x2: i16,
    pub y2: i16,
}

impl Pivot {
    /// Pivot on a cell.
    pub const fn cell(x: i16, y: i16) -> Self {
        Self { x2: x * 2, y2: y * 2 }
    }

    /// Pivot given directly in half-cells.
    pub const fn doubled(x2: i16, y2: i16) -> Self {
        Self { x2, y2 }
    }
}

/// Immutable archetype definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub kind: Archetype,
    pub cells: &'static [CellOffset],
    pub pivot: Pivot,
    /// CSS colour name.
    pub color: &'static str,
}

impl Template {
    /// A fresh copy of the spawn shape.
    pub fn shape(&self) -> Shape {
        Shape {
            cells: self.cells.iter().copied().collect(),
        }
    }
}

static TEMPLATES: [Template; 12] = [
    Template {
        kind: Archetype::One,
        cells: &[(1, 1)],
        pivot: Pivot::cell(1, 1),
        color: "beige",
    },
    Template {
        kind: Archetype::Two,
        cells: &[(1, 1), (2, 1)],
        pivot: Pivot::cell(2, 1),
        color: "greenyellow",
    },
    Template {
        kind: Archetype::Three,
        cells: &[(1, 1), (2, 1), (3, 1)],
        pivot: Pivot::cell(2, 1),
        color: "hotpink",
    },
    Template {
        kind: Archetype::Four,
        cells: &[(1, 1), (2, 1), (3, 1), (4, 1)],
        pivot: Pivot::cell(2, 1),
        color: "darkmagenta",
    },
    Template {
        kind: Archetype::L,
        cells: &[(1, 1), (1, 2), (1, 3), (2, 3)],
        pivot: Pivot::cell(1, 2),
        color: "red",
    },
    Template {
        kind: Archetype::J,
        cells: &[(2, 1), (2, 2), (2, 3), (1, 3)],
        pivot: Pivot::cell(2, 2),
        color: "forestgreen",
    },
    Template {
        kind: Archetype::Z,
        cells: &[(1, 1), (2, 1), (2, 2), (3, 2)],
        pivot: Pivot::cell(2, 2),
        color: "yellow",
    },
    Template {
        kind: Archetype::S,
        cells: &[(2, 1), (3, 1), (1, 2), (2, 2)],
        pivot: Pivot::cell(2, 2),
        color: "cyan",
    },
    Template {
        kind: Archetype::T,
        cells: &[(2, 1), (1, 2), (2, 2), (3, 2)],
        pivot: Pivot::cell(2, 2),
        color: "dodgerblue",
    },
    Template {
        kind: Archetype::U,
        cells: &[(1, 1), (3, 1), (1, 2), (2, 2), (3, 2)],
        pivot: Pivot::cell(2, 2),
        color: "orange",
    },
    Template {
        kind: Archetype::O,
        cells: &[(1, 1), (2, 1), (1, 2), (2, 2)],
        pivot: Pivot::doubled(3, 3),
        color: "slategray",
    },
    Template {
        kind: Archetype::V,
        cells: &[(1, 1), (1, 2), (2, 2)],
        pivot: Pivot::cell(1, 2),
        color: "chocolate",
    },
];

/// Template for an archetype.
pub fn template(kind: Archetype) -> &'static Template {
    &TEMPLATES[kind.index()]
}

/// Rotate every cell of `shape` 90° around `pivot`.
///
/// With `rel = cell - pivot`, the non-reversed archetypes map `+1` to
/// `(cx + rel_y, cy - rel_x)` and `-1` to `(cx - rel_y, cy + rel_x)`; reversed archetypes
/// swap the two.
pub fn rotate(shape: &Shape, pivot: Pivot, kind: Archetype, dir: RotationDir) -> Shape {
    let sense = if kind.reverse_rotation() {
        -dir.sign()
    } else {
        dir.sign()
    };

    let cells = shape
        .cells
        .iter()
        .map(|&(x, y)| {
            let rel_x = 2 * x as i16 - pivot.x2;
            let rel_y = 2 * y as i16 - pivot.y2;
            let (nx2, ny2) = if sense > 0 {
                (pivot.x2 + rel_y, pivot.y2 - rel_x)
            } else {
                (pivot.x2 - rel_y, pivot.y2 + rel_x)
            };
            (nx2.div_euclid(2) as i8, ny2.div_euclid(2) as i8)
        })
        .collect();

    Shape { cells }
}

/// Rotate with wall kicks.
///
/// The rotated shape is tried at the current anchor, then at anchor-x offsets
/// `-1, +1, -2, +2`. Returns the rotated shape and the x offset that fit, or `None` if
/// nothing fits (the caller keeps the piece unrotated). `y` never changes.
pub fn try_rotate(
    shape: &Shape,
    pivot: Pivot,
    kind: Archetype,
    x: i32,
    y: i32,
    dir: RotationDir,
    fits: impl Fn(i32, i32, &Shape) -> bool,
) -> Option<(Shape, i32)> {
    let rotated = rotate(shape, pivot, kind, dir);

    std::iter::once(0)
        .chain(KICK_OFFSETS.iter().copied())
        .map(i32::from)
        .find(|&dx| fits(x + dx, y, &rotated))
        .map(|dx| (rotated, dx))
}
