use std::cell::Cell;

use reduction_bench::arith::formula::FormulaVariant;
use reduction_bench::harness::{measure, time_ms, workloads, BenchConfig, Report, Timing};
use reduction_bench::ReduceError;

#[test]
fn measure_discards_warmups() {
    let calls = Cell::new(0u32);
    let m = measure(BenchConfig { warmup: 3, runs: 5 }, || {
        calls.set(calls.get() + 1);
        Ok(calls.get())
    })
    .unwrap();

    assert_eq!(calls.get(), 8);
    assert_eq!(m.samples_ms.len(), 5);
    assert_eq!(m.last, 8);
    assert!(m.min_ms() <= m.mean_ms() && m.mean_ms() <= m.max_ms());
}

#[test]
fn measure_runs_at_least_once() {
    let m = measure(BenchConfig { warmup: 0, runs: 0 }, || Ok(7)).unwrap();
    assert_eq!(m.samples_ms.len(), 1);
    assert_eq!(m.last, 7);
}

#[test]
fn measure_fails_fast() {
    let calls = Cell::new(0u32);
    let err = measure(BenchConfig::default(), || -> Result<(), _> {
        calls.set(calls.get() + 1);
        Err(ReduceError::InvalidWorkerCount(0))
    })
    .unwrap_err();

    assert_eq!(err, ReduceError::InvalidWorkerCount(0));
    assert_eq!(calls.get(), 1);
}

#[test]
fn time_ms_returns_value() {
    let (v, ms) = time_ms(|| 2 + 2);
    assert_eq!(v, 4);
    assert!(ms >= 0.0);
}

#[test]
fn report_display() {
    let mut report = Report::new("demo");
    report.results.push("total sum: 45".to_string());
    report.timings.push(Timing {
        label: "sequential".to_string(),
        mean_ms: 1.5,
        min_ms: 1.5,
        max_ms: 1.5,
        runs: 1,
    });
    report.matches_baseline = Some(true);

    assert_eq!(
        report.to_string(),
        "== demo ==\ntotal sum: 45\nsequential: 1.500 ms\nresults match the sequential baseline\n"
    );
}

#[test]
fn sum_workloads_match_baseline() {
    let once = BenchConfig::ONCE;
    for report in [
        workloads::sequential_sum(10_001, once).unwrap(),
        workloads::parallel_sum(10_001, 4, once).unwrap(),
        workloads::fork_join_sum(10_001, 100, Some(2), once).unwrap(),
    ] {
        assert_eq!(report.matches_baseline, Some(true), "{}", report.title);
        assert_eq!(report.results, vec!["total sum: 50005000".to_string()]);
    }
}

#[test]
fn other_workloads_match_baseline() {
    assert_eq!(workloads::matvec(101, 17, Some(3), 5).unwrap().matches_baseline, Some(true));
    assert_eq!(workloads::equation(2.0, 1_000).unwrap().matches_baseline, Some(true));
    assert_eq!(
        workloads::formula(3.0, 4.0, &FormulaVariant::ALL).unwrap().matches_baseline,
        Some(true)
    );
}

#[test]
fn stats_workload_reports_accumulator() {
    let report = workloads::stats(10).unwrap();
    assert!(report.results[0].contains("n: 50"));
    assert_eq!(report.matches_baseline, None);
}

#[test]
fn workload_errors_propagate() {
    let err = workloads::parallel_sum(10, 0, BenchConfig::ONCE).unwrap_err();
    assert_eq!(err, ReduceError::InvalidWorkerCount(0));
}

#[test]
fn sum_benchmarks_keep_their_own_run_counts() {
    let calls = Cell::new(0u32);
    let m = measure(BenchConfig::FORK_JOIN_SUM, || {
        calls.set(calls.get() + 1);
        Ok(())
    })
    .unwrap();
    assert_eq!(calls.get(), 15);
    assert_eq!(m.samples_ms.len(), 10);

    assert_eq!(BenchConfig::SEQUENTIAL_SUM, BenchConfig { warmup: 1, runs: 19 });
    assert_eq!(BenchConfig::PARALLEL_SUM, BenchConfig::default());
}
