use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{GameSnapshot, GameState, Grid};
use blockfall::term::{Canvas, GameView, Viewport};
use blockfall::types::Color;

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if !state.tick(black_box(16)) && state.game_over() {
                state.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..20 {
                for x in 0..10 {
                    grid.set(x, y, Some(Color::Cyan));
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_restart(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("restart", |b| {
        b.iter(|| {
            state.restart();
            black_box(state.active());
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            state.move_right();
            state.rotate();
            state.move_left();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut canvas = Canvas::new(80, 24);

    c.bench_function("snapshot_and_render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut canvas);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_restart,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
