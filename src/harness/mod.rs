//! Timing harness and console reports.
//!
//! Each benchmark runs through a warmup loop (timings discarded) followed by a
//! measured loop, and summarizes the measured wall-clock samples in
//! milliseconds. The result of the final run is kept so the caller can check
//! it against the sequential baseline.

pub mod workloads;

use std::fmt;
use std::time::Instant;

use crate::engine::error::ReduceResult;

/// Default number of discarded warmup runs.
pub const DEFAULT_WARMUP: u32 = 2;

/// Default number of measured runs.
pub const DEFAULT_RUNS: u32 = 18;

/// Run counts for one benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Runs executed before measuring; their timings are discarded.
    pub warmup: u32,

    /// Measured runs. At least one run is always executed.
    pub runs: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { warmup: DEFAULT_WARMUP, runs: DEFAULT_RUNS }
    }
}

impl BenchConfig {
    /// A single measured run with no warmup.
    pub const ONCE: BenchConfig = BenchConfig { warmup: 0, runs: 1 };

    /// Sequential sum: 1 warmup, 19 measured runs.
    pub const SEQUENTIAL_SUM: BenchConfig = BenchConfig { warmup: 1, runs: 19 };

    /// Fixed-pool sum: 2 warmups, 18 measured runs.
    pub const PARALLEL_SUM: BenchConfig = BenchConfig { warmup: DEFAULT_WARMUP, runs: DEFAULT_RUNS };

    /// Fork/join sum: 5 warmups, 10 measured runs.
    pub const FORK_JOIN_SUM: BenchConfig = BenchConfig { warmup: 5, runs: 10 };
}

/// Runs `f` once and returns its result with the elapsed wall time in ms.
pub fn time_ms<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1000.0)
}

/// Wall-clock samples of a measured loop plus the last result.
#[derive(Clone, Debug)]
pub struct Measurement<T> {
    /// One entry per measured run, in milliseconds.
    pub samples_ms: Vec<f64>,

    /// Result of the last measured run.
    pub last: T,
}

impl<T> Measurement<T> {
    /// Mean of the samples.
    pub fn mean_ms(&self) -> f64 {
        self.samples_ms.iter().sum::<f64>() / self.samples_ms.len() as f64
    }

    /// Fastest sample.
    pub fn min_ms(&self) -> f64 {
        self.samples_ms.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Slowest sample.
    pub fn max_ms(&self) -> f64 {
        self.samples_ms.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Condenses the samples into a [`Timing`] line labelled `label`.
    pub fn timing(&self, label: impl Into<String>) -> Timing {
        Timing {
            label: label.into(),
            mean_ms: self.mean_ms(),
            min_ms: self.min_ms(),
            max_ms: self.max_ms(),
            runs: self.samples_ms.len(),
        }
    }
}

/// Runs `f` `config.warmup` times unmeasured, then `config.runs` times
/// measured (at least once).
///
/// Fails fast: the first error from `f` aborts the loop.
pub fn measure<T>(
    config: BenchConfig,
    mut f: impl FnMut() -> ReduceResult<T>,
) -> ReduceResult<Measurement<T>> {
    for _ in 0..config.warmup {
        f()?;
    }

    let runs = config.runs.max(1) as usize;
    let mut samples_ms = Vec::with_capacity(runs);
    let mut last = None;
    for _ in 0..runs {
        let (out, ms) = time_ms(&mut f);
        last = Some(out?);
        samples_ms.push(ms);
    }

    match last {
        Some(last) => Ok(Measurement { samples_ms, last }),
        None => unreachable!("at least one measured run is executed"),
    }
}

/// One timing line of a report.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// What was measured.
    pub label: String,

    /// Mean wall time in ms.
    pub mean_ms: f64,

    /// Fastest run in ms.
    pub min_ms: f64,

    /// Slowest run in ms.
    pub max_ms: f64,

    /// Number of measured runs.
    pub runs: usize,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.runs == 1 {
            write!(f, "{}: {:.3} ms", self.label, self.mean_ms)
        } else {
            write!(
                f,
                "{}: average {:.3} ms (min {:.3} ms, max {:.3} ms, {} runs)",
                self.label, self.mean_ms, self.min_ms, self.max_ms, self.runs
            )
        }
    }
}

/// Console report for one benchmark program.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Benchmark name.
    pub title: String,

    /// Computed aggregate(s), one line each.
    pub results: Vec<String>,

    /// Timing lines.
    pub timings: Vec<Timing>,

    /// Whether the parallel result equals the sequential baseline, when the
    /// benchmark has one.
    pub matches_baseline: Option<bool>,
}

impl Report {
    /// Empty report titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            results: Vec::new(),
            timings: Vec::new(),
            matches_baseline: None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for line in &self.results {
            writeln!(f, "{line}")?;
        }
        for timing in &self.timings {
            writeln!(f, "{timing}")?;
        }
        match self.matches_baseline {
            Some(true) => writeln!(f, "results match the sequential baseline"),
            Some(false) => writeln!(f, "results DO NOT match the sequential baseline"),
            None => Ok(()),
        }
    }
}
