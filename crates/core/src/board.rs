//! Board module - occupancy grid, collision queries, locking and line clears
//!
//! The board is a 10x20 grid stored as a flat row-major array. A cell is occupied iff it
//! holds `Some(archetype)`; the archetype is kept only so renderers can colour locked cells.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Piece anchors may sit above the board (y = -1 at spawn); only the cells must be inside.

use arrayvec::ArrayVec;

use crate::types::{Archetype, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear pass, bottom-to-top.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Boolean view of the board, `[y][x]`.
pub type Occupancy = [[bool; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True iff every cell of `shape` anchored at (x, y) is inside the board and empty.
    ///
    /// ```
    /// use typefall_core::Board;
    ///
    /// let board = Board::new();
    /// assert!(board.can_move(0, 0, &[(0, 0), (1, 0)]));
    /// assert!(!board.can_move(9, 0, &[(0, 0), (1, 0)]));
    /// assert!(!board.can_move(0, -1, &[(0, 0)]));
    /// ```
    pub fn can_move(&self, x: i32, y: i32, shape: &[(i8, i8)]) -> bool {
        shape
            .iter()
            .all(|&(dx, dy)| self.is_free(x + dx as i32, y + dy as i32))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Lock a shape onto the board.
    ///
    /// Returns false (and leaves the board untouched) if any cell is out of bounds or
    /// already occupied.
    pub fn lock(&mut self, x: i32, y: i32, shape: &[(i8, i8)], kind: Archetype) -> bool {
        if !self.can_move(x, y, shape) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx as i32, y + dy as i32, Some(kind));
        }
        true
    }

    /// Clear every full row and return the cleared indices (bottom to top).
    ///
    /// Indices refer to the board as it was before the pass, which is what a renderer
    /// needs to know which drawn rows vanished.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        self.clear_full_rows_with(|row| cleared.push(row));
        cleared
    }

    /// Clear every full row, invoking `on_row` once per removed row (bottom to top).
    ///
    /// Rows above a removed row shift down and an empty row enters at the top. Uses a
    /// read/write two-pointer pass, so non-contiguous full rows all clear at once.
    pub fn clear_full_rows_with(&mut self, mut on_row: impl FnMut(usize)) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut count = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                on_row(read_y);
                count += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        count
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    pub fn occupancy(&self) -> Occupancy {
        let mut out = [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * BOARD_WIDTH as usize + x].is_some();
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from a boolean grid (occupied cells are tagged `O`).
    pub fn from_occupancy(grid: &Occupancy) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    board.cells[y * BOARD_WIDTH as usize + x] = Some(Archetype::O);
                }
            }
        }
        board
    }

    /// Fill a whole row (tests and benches).
    pub fn fill_row(&mut self, y: usize, kind: Archetype) {
        if y < BOARD_HEIGHT as usize {
            let start = y * BOARD_WIDTH as usize;
            self.cells[start..start + BOARD_WIDTH as usize].fill(Some(kind));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
