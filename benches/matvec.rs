use criterion::*;
use std::hint::black_box;

use reduction_bench::engine::sequential;
use reduction_bench::MatVecReducer;

mod common;
use common::*;

fn matvec_benchmark(c: &mut Criterion) {
    let (matrix, vector) = matvec_input(MATRIX_ROWS, MATRIX_COLS);
    let mut group = c.benchmark_group("matvec");
    group.throughput(Throughput::Elements((MATRIX_ROWS * MATRIX_COLS) as u64));

    group.bench_function("sequential_10k_x_1k", |b| {
        b.iter(|| black_box(sequential::multiply(&matrix, black_box(&vector)).unwrap()));
    });

    for workers in [2, 4, 8] {
        let reducer = MatVecReducer::new(workers);
        group.bench_function(format!("row_ranges_{workers}_10k_x_1k"), |b| {
            b.iter(|| black_box(reducer.multiply(&matrix, black_box(&vector)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, matvec_benchmark);
criterion_main!(benches);
