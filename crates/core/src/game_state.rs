//! Game state module - owns the board, the active piece, and the gravity clock
//!
//! The engine has two states. While running, `tick` applies time-driven
//! gravity and `apply_action` applies player commands immediately. Once a
//! freshly spawned piece does not fit, the round is over: the state is
//! frozen until the collaborator calls `reset`.
//!
//! Time is passed in by the caller as monotonic milliseconds, so the same
//! sequence of `tick`/`apply_action` calls always produces the same game.

use crate::board::ClearedRows;
use crate::pieces::{shape_of, spawn_x, ShapeMatrix};
use crate::rng::PieceBag;
use crate::types::*;
use crate::Board;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation, centered, one row above the board
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_of(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.size()),
            y: SPAWN_Y,
        }
    }

    /// Check if the piece fits on the board where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid(&self.shape, self.x, self.y)
    }

    /// Board cells covered by the piece, including ones above row 0.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }
}

/// Engine settings fixed for the lifetime of a `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the bag shuffle.
    pub seed: u32,
    /// Milliseconds between automatic one-row falls.
    pub gravity_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
        }
    }
}

/// Emitted after every lock (consumed by observers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Row indices removed by the lock, as they were before clearing.
    pub cleared_rows: ClearedRows,
}

/// Statistics for one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_id: u32,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub started_ms: u64,
    pub ended_ms: u64,
}

impl RoundSummary {
    pub fn duration_ms(&self) -> u64 {
        self.ended_ms.saturating_sub(self.started_ms)
    }
}

/// Result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round in progress.
    Running,
    /// The round ended since the previous tick. Reported once per round.
    RoundOver(RoundSummary),
    /// Round already reported over; waiting for `reset`.
    Halted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Piece,
    bag: PieceBag,
    gravity_interval_ms: u32,
    /// Time of the last gravity step (or of the reset that started the round).
    last_step_ms: u64,
    terminal: bool,
    /// Set on entering terminal; cleared when the notification is handed out.
    round_over_pending: bool,
    /// Monotonic round id (increments on reset).
    round_id: u32,
    round_started_ms: u64,
    round_ended_ms: u64,
    /// The round was ended by a command; the next `tick` stamps the end time.
    end_unstamped: bool,
    /// Monotonic id for spawned pieces within the game.
    piece_id: u32,
    pieces_locked: u32,
    lines_cleared: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given seed and default gravity; the first
    /// piece is spawned immediately.
    pub fn new(seed: u32, now_ms: u64) -> Self {
        Self::with_config(
            EngineConfig {
                seed,
                ..EngineConfig::default()
            },
            now_ms,
        )
    }

    pub fn with_config(config: EngineConfig, now_ms: u64) -> Self {
        Self::with_board(config, Board::new(), now_ms)
    }

    /// Start the first round on a prepared board (puzzles, replays, tests).
    ///
    /// If the first piece does not fit, the game starts out terminal.
    pub fn with_board(config: EngineConfig, board: Board, now_ms: u64) -> Self {
        let mut state = Self {
            config,
            board,
            active: Piece::spawn(PieceKind::I),
            bag: PieceBag::new(config.seed),
            gravity_interval_ms: config.gravity_interval_ms,
            last_step_ms: now_ms,
            terminal: false,
            round_over_pending: false,
            round_id: 0,
            round_started_ms: now_ms,
            round_ended_ms: now_ms,
            end_unstamped: false,
            piece_id: 0,
            pieces_locked: 0,
            lines_cleared: 0,
            last_event: None,
        };
        state.spawn_piece(now_ms);
        state
    }

    /// Start a fresh round: empty board, new piece, configured gravity.
    ///
    /// The bag keeps its stream, so rounds continue the same piece sequence.
    pub fn reset(&mut self, now_ms: u64) {
        self.board.clear();
        self.gravity_interval_ms = self.config.gravity_interval_ms;
        self.last_step_ms = now_ms;
        self.terminal = false;
        self.round_over_pending = false;
        self.round_id = self.round_id.wrapping_add(1);
        self.round_started_ms = now_ms;
        self.round_ended_ms = now_ms;
        self.end_unstamped = false;
        self.pieces_locked = 0;
        self.lines_cleared = 0;
        self.last_event = None;
        self.spawn_piece(now_ms);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    pub fn last_step_ms(&self) -> u64 {
        self.last_step_ms
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Statistics for the current (or just finished) round.
    pub fn round_summary(&self) -> RoundSummary {
        RoundSummary {
            round_id: self.round_id,
            lines_cleared: self.lines_cleared,
            pieces_locked: self.pieces_locked,
            started_ms: self.round_started_ms,
            ended_ms: self.round_ended_ms,
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::ActiveSnapshot;

        self.board.write_grid(&mut out.board);
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.landing_y();
        out.terminal = self.terminal;
        out.round_id = self.round_id;
        out.piece_id = self.piece_id;
        out.pieces_locked = self.pieces_locked;
        out.lines_cleared = self.lines_cleared;
        out.gravity_interval_ms = self.gravity_interval_ms;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the gravity clock to `now_ms`.
    ///
    /// When more than one gravity interval has passed since the last step,
    /// the piece falls one row, or locks if it cannot. At most one step is
    /// taken per call.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if !self.terminal
            && now_ms.saturating_sub(self.last_step_ms) > self.gravity_interval_ms as u64
        {
            self.step_down(now_ms);
            self.last_step_ms = now_ms;
        }

        if !self.terminal {
            return TickOutcome::Running;
        }

        if self.end_unstamped {
            self.end_unstamped = false;
            self.round_ended_ms = self.round_ended_ms.max(now_ms);
        }

        match self.take_round_over() {
            Some(summary) => TickOutcome::RoundOver(summary),
            None => TickOutcome::Halted,
        }
    }

    /// Hand out the round-over notification if one is pending.
    ///
    /// Returns `Some` exactly once per transition into the terminal state,
    /// whether it is collected here or through `tick`.
    pub fn take_round_over(&mut self) -> Option<RoundSummary> {
        if !self.round_over_pending {
            return None;
        }
        self.round_over_pending = false;
        Some(self.round_summary())
    }

    /// Apply a player command
    ///
    /// Returns whether the command changed the game. Rejected moves and
    /// rotations, and any command after the round is over, are no-ops.
    /// Commands carry no timestamp. If one ends the round, the end time is
    /// taken from the next `tick`, or is the last gravity step when the
    /// notification is collected through `take_round_over` instead.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.terminal {
            return false;
        }

        let now_ms = self.last_step_ms;
        let changed = match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => {
                self.step_down(now_ms);
                true
            }
            GameAction::HardDrop => {
                self.hard_drop(now_ms);
                true
            }
        };
        if self.terminal {
            self.end_unstamped = true;
        }
        changed
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let piece = self.active;
        if !self.board.is_valid(&piece.shape, piece.x + dx, piece.y + dy) {
            return false;
        }

        self.active = Piece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        };
        true
    }

    /// Rotate clockwise in place; rejected if the turned shape does not fit.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let piece = self.active;
        let rotated = piece.shape.rotate_cw();
        if !self.board.is_valid(&rotated, piece.x, piece.y) {
            return false;
        }

        self.active = Piece {
            shape: rotated,
            ..piece
        };
        true
    }

    /// One gravity step: fall a row, or lock where it stands.
    fn step_down(&mut self, now_ms: u64) {
        if !self.try_move(0, 1) {
            self.lock_piece(now_ms);
        }
    }

    /// Drop to the deepest valid row and lock. Returns rows fallen.
    pub(crate) fn hard_drop(&mut self, now_ms: u64) -> u32 {
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_piece(now_ms);
        distance
    }

    /// Lowest row the active piece could fall to.
    pub fn landing_y(&self) -> i8 {
        let piece = self.active;
        let mut y = piece.y;
        while self.board.is_valid(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Lock the active piece, clear full rows, and spawn the next piece
    fn lock_piece(&mut self, now_ms: u64) {
        let piece = self.active;
        self.board
            .lock_piece(&piece.shape, piece.x, piece.y, piece.kind);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cleared_rows = self.board.clear_full_rows();
        self.lines_cleared = self.lines_cleared.wrapping_add(cleared_rows.len() as u32);

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            cleared_rows,
        });

        self.spawn_piece(now_ms);
    }

    /// Spawn the next piece from the bag; a spawn that does not fit ends
    /// the round. The blocked piece stays visible as the active piece.
    fn spawn_piece(&mut self, now_ms: u64) {
        self.active = Piece::spawn(self.bag.next());
        self.piece_id = self.piece_id.wrapping_add(1);

        if !self.active.is_valid(&self.board) {
            self.terminal = true;
            self.round_over_pending = true;
            self.round_ended_ms = now_ms;
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
