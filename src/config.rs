//! Runner configuration read from the environment.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::{DEFAULT_GRAVITY_MS, INTERMISSION_MS};

pub const ENV_SEED: &str = "MOMENTUM_TETRIS_SEED";
pub const ENV_GRAVITY_MS: &str = "MOMENTUM_TETRIS_GRAVITY_MS";
pub const ENV_INTERMISSION_MS: &str = "MOMENTUM_TETRIS_INTERMISSION_MS";
pub const ENV_LOG_PATH: &str = "MOMENTUM_TETRIS_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub seed: u32,
    pub gravity_interval_ms: u32,
    pub intermission_ms: u64,
    /// JSONL file that receives one record per finished round.
    pub log_path: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
            intermission_ms: INTERMISSION_MS,
            log_path: None,
        }
    }
}

impl RunnerConfig {
    /// Read `MOMENTUM_TETRIS_*` variables. Missing or malformed values fall
    /// back to defaults; the seed defaults to the current time.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup(ENV_SEED)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);

        let gravity_interval_ms = lookup(ENV_GRAVITY_MS)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_GRAVITY_MS)
            .max(1);

        let intermission_ms = lookup(ENV_INTERMISSION_MS)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(INTERMISSION_MS);

        let log_path = lookup(ENV_LOG_PATH)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            gravity_interval_ms,
            intermission_ms,
            log_path,
        }
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            gravity_interval_ms: self.gravity_interval_ms,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
