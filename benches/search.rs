//! Benchmarks for heuristic evaluation and A* search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use fifteen::board::Board;
use fifteen::generator;
use fifteen::heuristics::Heuristic;
use fifteen::search;
use fifteen::topology::FIFTEEN_PUZZLE;

/// A fixed 4x4 start board 40 random moves from the goal.
fn start_board() -> Board<16> {
    let mut rng = SmallRng::seed_from_u64(7);
    generator::walk(&FIFTEEN_PUZZLE, 40, &mut rng)
}

/// Benchmark each heuristic on a single board.
fn bench_heuristics(c: &mut Criterion) {
    let board = start_board();
    let mut group = c.benchmark_group("evaluate");
    for heuristic in Heuristic::ALL {
        group.bench_function(heuristic.name(), |b| {
            b.iter(|| heuristic.evaluate(&FIFTEEN_PUZZLE, black_box(&board)))
        });
    }
    group.finish();
}

/// Benchmark full searches with the two informed heuristics.
fn bench_solve(c: &mut Criterion) {
    let board = start_board();
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
        group.bench_function(heuristic.name(), |b| {
            b.iter(|| search::solve(&FIFTEEN_PUZZLE, black_box(&board), heuristic))
        });
    }
    group.finish();
}

/// Benchmark generating start boards.
fn bench_generate(c: &mut Criterion) {
    let bounds = generator::WalkBounds::new(30, 80).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("generate_30_80", |b| {
        b.iter(|| generator::generate(&FIFTEEN_PUZZLE, black_box(bounds), &mut rng))
    });
}

criterion_group!(benches, bench_heuristics, bench_solve, bench_generate);
criterion_main!(benches);
