//! Benchmarks for the pick engine tick loop.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use gantry_pick::{OperatorLocale, PickEngine, PickSnapshot, RobotRegion};

/// A running engine with a populated belt.
fn warm_engine() -> PickEngine {
    let mut engine = PickEngine::new(OperatorLocale::Poland, RobotRegion::Midwest);
    engine.start();
    for _ in 0..500 {
        engine.tick(16.0);
    }
    engine
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_16ms_warm_belt", |b| {
        let mut engine = warm_engine();
        b.iter(|| {
            engine.tick(black_box(16.0));
        });
    });

    c.bench_function("tick_with_command_traffic", |b| {
        let mut engine = warm_engine();
        let mut flip = false;
        b.iter(|| {
            engine.issue_move(if flip { 320.0 } else { 280.0 });
            flip = !flip;
            engine.tick(black_box(16.0));
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    c.bench_function("snapshot_capture", |b| {
        let engine = warm_engine();
        b.iter(|| black_box(PickSnapshot::capture(&engine)));
    });
}

criterion_group!(benches, bench_tick, bench_snapshot);
criterion_main!(benches);
