//! Core types module - shared data structures and constants
//!
//! Plain data used by the engine, the input mapping, and the terminal view.
//! Nothing here depends on I/O or on any other crate.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! There is no hidden buffer above row 0. A freshly spawned piece sits at
//! `y = -1`, so its top row may be off the visible grid.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `DEFAULT_GRAVITY_MS` | 120 | Time between automatic one-row falls |
//! | `INTERMISSION_MS` | 5000 | End-of-round pause before the next round |
//!
//! # Examples
//!
//! ```
//! use momentum_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(GameAction::from_str("hold"), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row a new piece's local origin is placed on.
pub const SPAWN_Y: i8 = -1;

/// Driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Default gravity interval. Pieces fall one row every 120ms ("hard mode").
pub const DEFAULT_GRAVITY_MS: u32 = 120;

/// Default end-of-round pause before the collaborator resets the engine.
pub const INTERMISSION_MS: u64 = 5000;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use momentum_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of the kind as `(r, g, b)`.
    ///
    /// The palette is a family of pale cyans; kinds are told apart by
    /// shape more than by hue.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x7e, 0xf3, 0xff),
            PieceKind::O => (0xc8, 0xfb, 0xff),
            PieceKind::T => (0x9f, 0xef, 0xff),
            PieceKind::S => (0xae, 0xfa, 0xff),
            PieceKind::Z => (0x8e, 0xe7, 0xff),
            PieceKind::J => (0xb7, 0xf7, 0xff),
            PieceKind::L => (0xa1, 0xf3, 0xff),
        }
    }
}

/// Player commands accepted by the engine
///
/// Reset is not a command: collaborators call the engine's reset entry
/// point directly once their end-of-round presentation is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// One player-triggered gravity step
    SoftDrop,
    /// Drop to the lowest valid row and lock immediately
    HardDrop,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// Unknown names yield `None`; callers drop them.
    ///
    /// # Examples
    ///
    /// ```
    /// use momentum_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "softdrop" | "down" => Some(GameAction::SoftDrop),
            "harddrop" | "drop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell tagged with the kind that filled it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Rotate,
            GameAction::SoftDrop,
            GameAction::HardDrop,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn piece_names_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn palette_values() {
        assert_eq!(PieceKind::I.color(), (0x7e, 0xf3, 0xff));
        assert_eq!(PieceKind::O.color(), (0xc8, 0xfb, 0xff));
        assert_eq!(PieceKind::L.color(), (0xa1, 0xf3, 0xff));
    }
}
