//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and state transitions. It has **zero
//! dependencies** on UI, terminals, clocks, or I/O:
//!
//! - **Deterministic**: same seed and same call sequence give the same game
//! - **Total**: every operation either succeeds or is a defined no-op
//! - **Single-threaded**: the caller owns the [`GameState`] and drives it
//!
//! # Module Structure
//!
//! - [`pieces`]: shape matrices and pure clockwise rotation
//! - [`rng`]: 7-bag piece generation
//! - [`board`]: 10x20 grid, collision testing, locking, line clearing
//! - [`game_state`]: active piece, gravity clock, commands, round lifecycle
//! - [`snapshot`]: read-only copies handed to renderers
//!
//! # Example
//!
//! ```
//! use momentum_tetris_core::{GameState, TickOutcome};
//! use momentum_tetris_core::types::GameAction;
//!
//! let mut game = GameState::new(12345, 0);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.pieces_locked(), 1);
//!
//! // Drive gravity with a monotonic millisecond clock.
//! assert_eq!(game.tick(500), TickOutcome::Running);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use momentum_tetris_types as types;

pub use board::{Board, ClearedRows, BOARD_COLS, BOARD_ROWS};
pub use game_state::{EngineConfig, GameState, LockEvent, Piece, RoundSummary, TickOutcome};
pub use pieces::{rotate_cw, shape_of, spawn_x, ShapeMatrix};
pub use rng::{PieceBag, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
