//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or tagged with the
//! kind of the piece that locked there. Storage is a flat row-major array.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Nothing exists above row 0.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board width as a `usize`.
pub const BOARD_COLS: usize = BOARD_WIDTH as usize;

/// Board height as a `usize`.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Row indices removed by one clear pass, bottom to top.
pub type ClearedRows = ArrayVec<usize, BOARD_ROWS>;

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

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * BOARD_COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `shape` fits with its local origin at `(off_x, off_y)`.
    ///
    /// A cell fails when it leaves the side walls or the floor, or lands on
    /// an occupied on-board cell. Cells above row 0 are only checked against
    /// the side walls.
    pub fn is_valid(&self, shape: &ShapeMatrix, off_x: i8, off_y: i8) -> bool {
        shape.cells().all(|(dx, dy)| {
            // Widened so offsets near the i8 limits cannot overflow.
            let nx = off_x as i16 + dx as i16;
            let ny = off_y as i16 + dy as i16;
            if nx < 0 || nx >= BOARD_WIDTH as i16 || ny >= BOARD_HEIGHT as i16 {
                return false;
            }
            ny < 0 || !self.is_occupied(nx as i8, ny as i8)
        })
    }

    /// Write `kind` into every occupied cell of `shape` at `(x, y)`.
    ///
    /// Cells above row 0 or off the board are dropped without error.
    /// Returns the number of cells written.
    pub fn lock_piece(&mut self, shape: &ShapeMatrix, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.cells() {
            let (Some(bx), Some(by)) = (x.checked_add(dx), y.checked_add(dy)) else {
                continue;
            };
            if by < 0 {
                continue;
            }
            if self.set(bx, by, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_COLS;
        self.cells[start..start + BOARD_COLS]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift every row above it down by one, and put an
    /// empty row at the top.
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_ROWS {
            return;
        }

        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * BOARD_COLS, BOARD_COLS);
        self.cells[..BOARD_COLS].fill(None);
    }

    /// Clear all full rows, scanning from the bottom.
    ///
    /// After a clear the same row index is tested again, since the row above
    /// has just moved into it. Returns the indices the cleared rows had
    /// before the pass, bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_ROWS;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                // Everything above `row` has shifted down once per clear so far.
                cleared.push(row - cleared.len());
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_COLS)
    }

    /// Copy into a 2D grid (snapshot layout).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_COLS]; BOARD_ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
