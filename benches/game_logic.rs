use criterion::{black_box, criterion_group, criterion_main, Criterion};
use momentum_tetris::core::{shape_of, Board, GameSnapshot, GameState, TickOutcome};
use momentum_tetris::term::{FrameBuffer, GameView, Overlay, Viewport};
use momentum_tetris::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345, 0);
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            if state.tick(black_box(now)) != TickOutcome::Running {
                state.reset(now);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_is_valid(c: &mut Criterion) {
    let board = Board::new();
    let shape = shape_of(PieceKind::T);

    c.bench_function("is_valid", |b| {
        b.iter(|| black_box(board.is_valid(&shape, black_box(3), black_box(10))))
    });
}

fn bench_reset(c: &mut Criterion) {
    let mut state = GameState::new(12345, 0);

    c.bench_function("reset_round", |b| {
        b.iter(|| {
            state.reset(black_box(0));
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345, 0);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveLeft);
            state.apply_action(GameAction::MoveRight);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345, 0);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.apply_action(GameAction::Rotate);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345, 0);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Overlay::None, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_is_valid,
    bench_reset,
    bench_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
