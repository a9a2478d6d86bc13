//! One function per benchmark program.
//!
//! Every function generates its input, times the implementations it compares,
//! checks the parallel result against the baseline, and returns a [`Report`].
//! Mismatches are also reported on stderr.

use crate::arith::equation;
use crate::arith::formula::FormulaVariant;
use crate::engine::error::ReduceResult;
use crate::engine::fixed_pool::FixedPoolReducer;
use crate::engine::fork_join::DivideAndConquerReducer;
use crate::engine::matvec::MatVecReducer;
use crate::engine::random::{sequential_fill, sequential_fill_sum, InputGenerator};
use crate::engine::sequential;
use crate::engine::stats;
use crate::harness::{measure, time_ms, BenchConfig, Report};

fn check(report: &mut Report, matches: bool) {
    if !matches {
        eprintln!("warning: {}: parallel result differs from the sequential baseline", report.title);
    }
    report.matches_baseline = Some(matches);
}

/// Sums `0..size` with a single accumulator.
pub fn sequential_sum(size: usize, config: BenchConfig) -> ReduceResult<Report> {
    let input = sequential_fill(size);
    let m = measure(config, || Ok(sequential::sum(&input)))?;

    let mut report = Report::new("sequential-sum");
    report.results.push(format!("total sum: {}", m.last));
    report.timings.push(m.timing("sequential"));
    check(&mut report, m.last == sequential_fill_sum(size));
    Ok(report)
}

/// Sums `0..size` with the fixed-pool reducer.
pub fn parallel_sum(size: usize, workers: usize, config: BenchConfig) -> ReduceResult<Report> {
    let input = sequential_fill(size);
    let reducer = FixedPoolReducer::new(workers);
    let m = measure(config, || reducer.sum(&input))?;

    let mut report = Report::new("parallel-sum");
    report.results.push(format!("total sum: {}", m.last));
    report.timings.push(m.timing(format!("fixed pool ({workers} workers)")));
    check(&mut report, m.last == sequential_fill_sum(size));
    Ok(report)
}

/// Sums `0..size` with the divide-and-conquer reducer.
pub fn fork_join_sum(
    size: usize,
    threshold: usize,
    workers: Option<usize>,
    config: BenchConfig,
) -> ReduceResult<Report> {
    let input = sequential_fill(size);
    let mut reducer = DivideAndConquerReducer::new(threshold);
    if let Some(workers) = workers {
        reducer = reducer.with_workers(workers);
    }
    let m = measure(config, || reducer.sum(&input))?;

    let mut report = Report::new("fork-join-sum");
    report.results.push(format!("total sum: {}", m.last));
    report.timings.push(m.timing(format!("fork/join (threshold {})", reducer.threshold())));
    check(&mut report, m.last == sequential_fill_sum(size));
    Ok(report)
}

/// Multiplies a random `rows × cols` matrix by a random vector, sequentially
/// and in parallel.
pub fn matvec(
    rows: usize,
    cols: usize,
    workers: Option<usize>,
    seed: u64,
) -> ReduceResult<Report> {
    let ((matrix, vector), gen_ms) = time_ms(|| {
        let mut gen = InputGenerator::new(seed);
        let matrix = gen.random_matrix(rows, cols);
        let vector = gen.fill_f64(cols);
        (matrix, vector)
    });

    let reducer = workers.map_or_else(MatVecReducer::with_available_parallelism, MatVecReducer::new);

    let seq = measure(BenchConfig::ONCE, || sequential::multiply(&matrix, &vector))?;
    let par = measure(BenchConfig::ONCE, || reducer.multiply(&matrix, &vector))?;

    let mut report = Report::new("matvec");
    report.results.push(format!("{} x {} matrix, {} worker threads", rows, cols, reducer.workers()));
    report.results.push(format!("generation time: {gen_ms:.3} ms"));
    report.timings.push(seq.timing("sequential"));
    report.timings.push(par.timing("parallel"));
    check(&mut report, seq.last == par.last);
    Ok(report)
}

/// Evaluates the series sum sequentially and in parallel.
pub fn equation(x: f64, n: u32) -> ReduceResult<Report> {
    let seq = measure(BenchConfig::ONCE, || Ok(equation::complex_equation_sequential(x, n)))?;
    let par = measure(BenchConfig::ONCE, || Ok(equation::complex_equation_parallel(x, n)))?;

    let mut report = Report::new("equation");
    report.results.push(format!("sequential result: {}", seq.last));
    report.results.push(format!("parallel result: {}", par.last));
    report.timings.push(seq.timing("sequential"));
    report.timings.push(par.timing("parallel"));

    let scale = seq.last.abs().max(1.0);
    check(&mut report, (seq.last - par.last).abs() <= scale * 1e-9);
    Ok(report)
}

/// Evaluates each of `variants` once at `(x, y)`.
pub fn formula(x: f64, y: f64, variants: &[FormulaVariant]) -> ReduceResult<Report> {
    let mut report = Report::new("formula");
    let baseline = FormulaVariant::Original.evaluate(x, y);
    let mut matches = true;

    for &variant in variants {
        let m = measure(BenchConfig::ONCE, || Ok(variant.evaluate(x, y)))?;
        report.results.push(format!("{variant}: {}", m.last));
        report.timings.push(m.timing(variant.to_string()));
        matches &= (m.last - baseline).abs() <= baseline.abs().max(1.0) * 1e-12;
    }

    check(&mut report, matches);
    Ok(report)
}

/// Runs the statistics-accumulator stress loop.
pub fn stats(iterations: u64) -> ReduceResult<Report> {
    let m = measure(BenchConfig::ONCE, || Ok(stats::stress(iterations)))?;

    let mut report = Report::new("stats");
    report.results.push(m.last.to_string());
    report.timings.push(m.timing("stress loop"));
    Ok(report)
}
