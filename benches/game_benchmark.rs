//! Benchmarks for running complete headless matches.
//!
//! This benchmarks the full round loop: both decision sources, the rules
//! and the victory check.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use paddy::game::{Action, Coord, GameState, Side, apply_action};
use paddy::simulate::{MatchConfig, run_match};

fn bench_single_match(c: &mut Criterion) {
    let config = MatchConfig::default();

    c.bench_function("single_match_5x5", |b| {
        b.iter(|| {
            let result = run_match(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_large_board(c: &mut Criterion) {
    // Large boards rarely finish, so this measures the round limit
    let config = MatchConfig {
        board_size: 32,
        max_rounds: 500,
    };

    c.bench_function("match_32x32_500_rounds", |b| {
        b.iter(|| {
            let result = run_match(black_box(7), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_match_batch(c: &mut Criterion) {
    // 100 matches sequentially (without parallel overhead)
    let config = MatchConfig::default();

    c.bench_function("100_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..100u64 {
                let result = run_match(black_box(seed), black_box(&config));
                let _ = black_box(result);
            }
        });
    });
}

fn bench_actions(c: &mut Criterion) {
    let actions = [
        Action::GatherWater,
        Action::Irrigate,
        Action::Recruit,
        Action::Capture(Coord::new(2, 3)),
    ];

    c.bench_function("apply_action_cycle", |b| {
        b.iter(|| {
            let mut state = GameState::new(8).unwrap_or_else(|e| panic!("{e}"));
            for action in actions {
                let _ = black_box(apply_action(&mut state, Side::Player, black_box(action)));
            }
            black_box(state)
        });
    });
}

criterion_group!(
    benches,
    bench_single_match,
    bench_large_board,
    bench_match_batch,
    bench_actions
);
criterion_main!(benches);
