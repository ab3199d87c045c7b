//! Momentum Tetris (workspace facade crate).
//!
//! The engine, input mapping, and terminal view live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `momentum_tetris::{core,input,term,types}` and owns the runner-level
//! pieces (environment config and the round log).

pub mod config;
pub mod round_log;

pub use momentum_tetris_core as core;
pub use momentum_tetris_input as input;
pub use momentum_tetris_term as term;
pub use momentum_tetris_types as types;

pub use config::RunnerConfig;
pub use round_log::{RoundLog, RoundRecord};
