//! Terminal front-end for the falling-block engine.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the
//! terminal, rather than going through a widget toolkit. Board cells are
//! drawn 2 columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use momentum_tetris_core as core;
pub use momentum_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
