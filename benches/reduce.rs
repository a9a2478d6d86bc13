use criterion::*;
use std::hint::black_box;

use reduction_bench::engine::sequential;
use reduction_bench::{DivideAndConquerReducer, FixedPoolReducer};

mod common;
use common::*;

fn reduce_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for &len in &[ELEMENTS_SMALL, ELEMENTS_MED, ELEMENTS_LARGE] {
        let input = sum_input(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("sequential", len), &input, |b, input| {
            b.iter(|| black_box(sequential::sum(black_box(input))));
        });

        for workers in [2, 4, 8] {
            let reducer = FixedPoolReducer::new(workers);
            group.bench_with_input(
                BenchmarkId::new(format!("fixed_pool_{workers}"), len),
                &input,
                |b, input| b.iter(|| black_box(reducer.sum(black_box(input)).unwrap())),
            );
        }

        let reducer = DivideAndConquerReducer::new(len / 16);
        group.bench_with_input(BenchmarkId::new("fork_join_n16", len), &input, |b, input| {
            b.iter(|| black_box(reducer.sum(black_box(input)).unwrap()));
        });
    }

    group.finish();
}

fn threshold_benchmark(c: &mut Criterion) {
    let input = sum_input(ELEMENTS_LARGE);
    let mut group = c.benchmark_group("fork_join_threshold");

    for threshold in [1_000, 10_000, 100_000, 1_000_000, ELEMENTS_LARGE] {
        let reducer = DivideAndConquerReducer::new(threshold);
        group.bench_with_input(BenchmarkId::from_parameter(threshold), &input, |b, input| {
            b.iter(|| black_box(reducer.sum(black_box(input)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, reduce_benchmark, threshold_benchmark);
criterion_main!(benches);
