//! Benchmark for flag unions, comparison and subtraction.

use actkit::flag::{Flag, flag, flag_sum, flag_to};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// =============================================================================
// Union
// =============================================================================

fn benchmark_union(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("union");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("flag_to", size), &size, |bencher, &size| {
            bencher.iter(|| black_box(flag_to(0..black_box(size))));
        });

        group.bench_with_input(BenchmarkId::new("flag_sum", size), &size, |bencher, &size| {
            let names: Vec<String> = (0..size).map(|index| format!("flag{index}")).collect();
            bencher.iter(|| black_box(flag_sum(names.iter().map(|name| flag(name)))));
        });
    }

    group.finish();
}

// =============================================================================
// Comparison and subtraction
// =============================================================================

fn benchmark_compare(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("compare");

    for size in [10, 100, 1000] {
        let union = flag_to(0..size).unwrap_or_else(|_| Flag::nothing());
        let last = Flag::value(size - 1).unwrap_or_else(|_| Flag::nothing());

        group.bench_with_input(BenchmarkId::new("contains_last", size), &size, |bencher, _| {
            bencher.iter(|| black_box(black_box(&union) == black_box(&last)));
        });

        group.bench_with_input(BenchmarkId::new("subtract_last", size), &size, |bencher, _| {
            bencher.iter(|| black_box(black_box(&union) - black_box(&last)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_union, benchmark_compare);
criterion_main!(benches);
