//! Read-only view of the engine handed to renderers and observers.

use crate::board::{BOARD_COLS, BOARD_ROWS};
use crate::game_state::Piece;
use crate::pieces::{shape_of, ShapeMatrix};
use crate::types::{Cell, PieceKind, DEFAULT_GRAVITY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Board cells covered by the piece, including ones above row 0.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS]; BOARD_ROWS],
    pub active: ActiveSnapshot,
    /// Row the active piece would land on.
    pub ghost_y: i8,
    pub terminal: bool,
    pub round_id: u32,
    pub piece_id: u32,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
    pub gravity_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.terminal
    }

    /// Locked cell at `(x, y)`; `None` when empty or off the board.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
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
        let kind = PieceKind::I;
        Self {
            board: [[None; BOARD_COLS]; BOARD_ROWS],
            active: ActiveSnapshot {
                kind,
                shape: shape_of(kind),
                x: 0,
                y: 0,
            },
            ghost_y: 0,
            terminal: false,
            round_id: 0,
            piece_id: 0,
            pieces_locked: 0,
            lines_cleared: 0,
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
        }
    }
}
