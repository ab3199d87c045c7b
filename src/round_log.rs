//! Append-only JSONL log of finished rounds.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::RoundSummary;

/// One line of the round log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_id: u32,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub duration_ms: u64,
    /// Wall-clock end of the round, milliseconds since the Unix epoch.
    pub ended_at_unix_ms: u64,
}

impl RoundRecord {
    pub fn from_summary(summary: &RoundSummary, ended_at_unix_ms: u64) -> Self {
        Self {
            round_id: summary.round_id,
            lines_cleared: summary.lines_cleared,
            pieces_locked: summary.pieces_locked,
            duration_ms: summary.duration_ms(),
            ended_at_unix_ms,
        }
    }

    /// Stamp with the current wall-clock time.
    pub fn now(summary: &RoundSummary) -> Self {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::from_summary(summary, unix_ms)
    }
}

pub struct RoundLog {
    file: File,
    buf: Vec<u8>,
}

impl RoundLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("round log: open {} failed", path.display()))?;
        Ok(Self {
            file,
            buf: Vec::with_capacity(256),
        })
    }

    /// Write one record as a single JSON line.
    pub fn append(&mut self, record: &RoundRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        self.file
            .write_all(&self.buf)
            .context("round log: write failed")?;
        self.file.flush()?;
        Ok(())
    }
}
