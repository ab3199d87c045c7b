//! Integration tests for the game loop: gravity, commands, round lifecycle

use momentum_tetris::core::{Board, EngineConfig, GameState, PieceBag, TickOutcome};
use momentum_tetris::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_Y};

fn config(gravity_interval_ms: u32) -> EngineConfig {
    EngineConfig {
        seed: 2024,
        gravity_interval_ms,
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345, 0);
    assert!(!game.is_terminal());
    assert_eq!(game.round_id(), 0);
    assert_eq!(game.active().y, SPAWN_Y);

    for _ in 0..5 {
        assert!(game.apply_action(GameAction::HardDrop));
    }
    assert_eq!(game.pieces_locked(), 5);
    assert_eq!(game.board().filled_count(), 20);
}

#[test]
fn test_gravity_follows_wall_clock() {
    let mut game = GameState::with_config(config(100), 1_000);
    let y0 = game.active().y;

    // Exactly one interval is not enough.
    assert_eq!(game.tick(1_100), TickOutcome::Running);
    assert_eq!(game.active().y, y0);

    assert_eq!(game.tick(1_101), TickOutcome::Running);
    assert_eq!(game.active().y, y0 + 1);
    assert_eq!(game.last_step_ms(), 1_101);

    // Frame rate does not matter; only elapsed time does.
    for t in (1_102..=1_201).step_by(7) {
        game.tick(t);
    }
    assert_eq!(game.active().y, y0 + 1);
    game.tick(1_202);
    assert_eq!(game.active().y, y0 + 2);
}

#[test]
fn test_soft_drop_does_not_double_step() {
    let mut game = GameState::with_config(config(100), 0);
    let y0 = game.active().y;

    game.apply_action(GameAction::SoftDrop);
    assert_eq!(game.active().y, y0 + 1);
    assert_eq!(game.last_step_ms(), 0);

    game.tick(101);
    assert_eq!(game.active().y, y0 + 2);
}

#[test]
fn test_hard_drop_lands_at_deepest_row() {
    let mut game = GameState::new(99, 0);
    let piece = game.active();
    let deepest = game.landing_y();

    // Deepest valid row on an empty board puts the lowest cell on the floor.
    let lowest = piece.shape.cells().map(|(_, dy)| dy).max().unwrap_or(0);
    assert_eq!(deepest, BOARD_HEIGHT as i8 - 1 - lowest);

    game.apply_action(GameAction::HardDrop);

    assert_eq!(game.board().filled_count(), 4);
    for (dx, dy) in piece.shape.cells() {
        assert_eq!(
            game.board().get(piece.x + dx, deepest + dy),
            Some(Some(piece.kind))
        );
    }
    assert_eq!(game.pieces_locked(), 1);
}

#[test]
fn test_lock_clears_bottom_row() {
    // Leave gaps exactly where the first piece's bottom row will land.
    let probe = GameState::new(7, 0).active();
    let lowest = probe.shape.cells().map(|(_, dy)| dy).max().unwrap_or(0);
    let gaps: Vec<i8> = probe
        .shape
        .cells()
        .filter(|&(_, dy)| dy == lowest)
        .map(|(dx, _)| probe.x + dx)
        .collect();

    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        if !gaps.contains(&x) {
            board.set(x, BOARD_HEIGHT as i8 - 1, Some(PieceKind::Z));
        }
    }

    let mut game = GameState::with_board(
        EngineConfig {
            seed: 7,
            ..EngineConfig::default()
        },
        board,
        0,
    );
    assert_eq!(game.active(), probe);

    game.apply_action(GameAction::HardDrop);

    let event = game.take_last_event().expect("lock event");
    assert_eq!(event.kind, probe.kind);
    assert_eq!(event.cleared_rows.as_slice(), &[BOARD_HEIGHT as usize - 1]);
    assert_eq!(game.lines_cleared(), 1);
    assert_eq!(game.board().rows().count(), BOARD_HEIGHT as usize);
    assert!(game.board().rows().next().is_some_and(|r| r.iter().all(|c| c.is_none())));
    assert_eq!(game.board().filled_count(), 4 - gaps.len());
}

fn blocked_spawn_board() -> Board {
    // Row 0, columns 3..=6: every spawn footprint touches it.
    let mut board = Board::new();
    for x in 3..=6 {
        board.set(x, 0, Some(PieceKind::L));
    }
    board
}

#[test]
fn test_blocked_spawn_is_terminal() {
    let mut game = GameState::with_board(config(50), blocked_spawn_board(), 0);
    assert!(game.is_terminal());

    let board = game.board().clone();
    let active = game.active();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ] {
        assert!(!game.apply_action(action));
    }
    match game.tick(1_000) {
        TickOutcome::RoundOver(summary) => {
            assert_eq!(summary.round_id, 0);
            assert_eq!(summary.pieces_locked, 0);
        }
        other => panic!("expected round over, got {other:?}"),
    }
    assert_eq!(game.tick(2_000), TickOutcome::Halted);
    assert_eq!(game.take_round_over(), None);

    assert_eq!(game.board(), &board);
    assert_eq!(game.active(), active);
}

#[test]
fn test_stacking_ends_round_once() {
    let mut game = GameState::with_config(config(1_000), 0);
    let mut reports = 0;
    let mut now = 0;

    for _ in 0..200 {
        game.apply_action(GameAction::HardDrop);
        now += 10;
        if let TickOutcome::RoundOver(summary) = game.tick(now) {
            reports += 1;
            assert!(summary.pieces_locked > 0);
        }
    }

    assert!(game.is_terminal());
    assert_eq!(reports, 1);
}

#[test]
fn test_reset_starts_new_round() {
    let mut game = GameState::with_board(config(80), blocked_spawn_board(), 0);
    assert!(game.is_terminal());
    assert!(game.take_round_over().is_some());

    game.reset(5_000);

    assert!(!game.is_terminal());
    assert_eq!(game.round_id(), 1);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.gravity_interval_ms(), 80);
    assert_eq!(game.last_step_ms(), 5_000);
    assert_eq!(game.active().y, SPAWN_Y);
    assert_eq!(game.tick(5_050), TickOutcome::Running);
}

#[test]
fn test_pieces_follow_bag_order() {
    let mut bag = PieceBag::new(31337);
    let mut game = GameState::new(31337, 0);

    for _ in 0..21 {
        assert_eq!(game.active().kind, bag.next());
        game.apply_action(GameAction::HardDrop);
        if game.is_terminal() {
            break;
        }
    }
}

#[test]
fn test_snapshot_reflects_state() {
    let mut game = GameState::new(5, 0);
    game.apply_action(GameAction::HardDrop);

    let snap = game.snapshot();
    assert_eq!(snap.pieces_locked, 1);
    assert_eq!(snap.active.kind, game.active().kind);
    assert_eq!(snap.ghost_y, game.landing_y());
    assert!(snap.playable());
    let filled = snap.board.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(filled, 4);
}
