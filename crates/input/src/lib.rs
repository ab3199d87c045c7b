//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Commands
//! are applied as soon as they arrive; there is no auto-repeat layer, so
//! terminal key repeat simply produces more commands.

pub mod map;

pub use momentum_tetris_types as types;

pub use map::{handle_key_event, should_quit, should_skip_intermission};
