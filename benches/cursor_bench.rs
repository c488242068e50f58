//! Benchmark for building and evaluating action cursors.
//!
//! Compares a recorded cursor expression against the same computation written
//! as a plain closure over values.

use actkit::cursor::{ActionCursor, a, b, c};
use actkit::value::{BinaryOperator, Value};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sum_of(depth: usize) -> ActionCursor {
    (0..depth).fold(a(), |cursor, step| {
        cursor + i64::try_from(step).unwrap_or_default()
    })
}

// =============================================================================
// Building
// =============================================================================

fn benchmark_build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");

    for depth in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("constant_steps", depth), &depth, |bencher, &depth| {
            bencher.iter(|| black_box(sum_of(black_box(depth))));
        });
    }

    group.bench_function("mixed_parameters", |bencher| {
        bencher.iter(|| black_box((a() + b()) * c() - a().attr("x")));
    });

    group.finish();
}

// =============================================================================
// Evaluation
// =============================================================================

fn benchmark_evaluate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("evaluate");

    for depth in [1, 10, 100] {
        let cursor = sum_of(depth);

        group.bench_with_input(BenchmarkId::new("ActionCursor", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(cursor.evaluate_with([black_box(Value::from(1))])));
        });

        group.bench_with_input(BenchmarkId::new("closure", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut value = black_box(Value::from(1));
                for step in 0..depth {
                    let step = Value::from(i64::try_from(step).unwrap_or_default());
                    value = BinaryOperator::Add.apply(&value, &step).unwrap_or_default();
                }
                black_box(value)
            });
        });
    }

    let merged = (a() + b()) * c();
    group.bench_function("merged_parameters", |bencher| {
        bencher.iter(|| {
            black_box(merged.evaluate_with([Value::from(1), Value::from(2), Value::from(3)]))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_evaluate);
criterion_main!(benches);
