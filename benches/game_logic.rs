use criterion::{black_box, criterion_group, criterion_main, Criterion};
use webtris::core::{Engine, EngineConfig, Grid, RandomShapes};
use webtris::types::{Cell, GameCommand, PieceKind};

fn engine() -> Engine {
    let config = EngineConfig {
        seed: Some(12345),
        ..EngineConfig::default()
    };
    Engine::new(config).unwrap()
}

fn bench_tick(c: &mut Criterion) {
    let mut engine = engine();

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            if !black_box(engine.tick()) {
                engine = self::engine();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for row in 17..=20 {
                grid.fill_row(row, Cell::Locked(PieceKind::I));
            }
            let rows = grid.completed_rows();
            grid.clear_rows(black_box(&rows))
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut engine = engine();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(engine.spawn_piece());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = engine();
    let mut left = true;

    c.bench_function("move_lateral", |b| {
        b.iter(|| {
            let moved = if left {
                engine.move_left()
            } else {
                engine.move_right()
            };
            if !moved {
                left = !left;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = engine();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.apply(GameCommand::Rotate));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_session", |b| {
        b.iter(|| {
            let mut engine: Engine<RandomShapes> = engine();
            while engine.hard_drop() {}
            black_box(engine.score())
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
