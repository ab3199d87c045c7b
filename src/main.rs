//! Terminal runner (default binary).
//!
//! Drives the engine from a crossterm event loop: renders a snapshot every
//! frame, applies key commands immediately, ticks gravity with a monotonic
//! clock, and runs the end-of-round intermission before resetting.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use momentum_tetris::core::{GameSnapshot, GameState, TickOutcome};
use momentum_tetris::input::{handle_key_event, should_quit, should_skip_intermission};
use momentum_tetris::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use momentum_tetris::types::FRAME_MS;
use momentum_tetris::{RoundLog, RoundRecord, RunnerConfig};

#[derive(Debug, Default)]
struct Session {
    rounds: u32,
    lines: u64,
    /// First round-log failure; reported after the terminal is restored.
    log_error: Option<anyhow::Error>,
}

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();

    let mut log = match config.log_path.as_deref() {
        Some(path) => match RoundLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("momentum-tetris: {e:#}; round log disabled");
                None
            }
        },
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut session = Session::default();
    let result = run(&mut term, &config, log.as_mut(), &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(e) = session.log_error.take() {
        eprintln!("momentum-tetris: {e:#}");
    }
    eprintln!(
        "momentum-tetris: {} round(s) finished, {} line(s) cleared",
        session.rounds, session.lines
    );
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &RunnerConfig,
    mut log: Option<&mut RoundLog>,
    session: &mut Session,
) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game = GameState::with_config(config.engine(), now_ms());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS);

    // Set while the round-over overlay is up: when the next round starts.
    let mut resume_at: Option<u64> = None;

    loop {
        let frame_start = Instant::now();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let overlay = match resume_at {
            Some(at) => Overlay::RoundOver {
                remaining_ms: at.saturating_sub(now_ms()),
            },
            None => Overlay::None,
        };
        game.snapshot_into(&mut snap);
        view.render_into(&snap, overlay, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if resume_at.is_some() {
                        if should_skip_intermission(key) {
                            resume_at = Some(now_ms());
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = now_ms();
        match resume_at {
            Some(at) if now >= at => {
                game.reset(now);
                resume_at = None;
            }
            Some(_) => {}
            None => {
                // Also reports rounds ended by a command since the last tick.
                if let TickOutcome::RoundOver(summary) = game.tick(now) {
                    session.rounds += 1;
                    session.lines += summary.lines_cleared as u64;
                    if let Some(log) = log.as_deref_mut() {
                        if let Err(e) = log.append(&RoundRecord::now(&summary)) {
                            session.log_error.get_or_insert(e);
                        }
                    }
                    resume_at = Some(now.saturating_add(config.intermission_ms));
                }
            }
        }
    }
}
