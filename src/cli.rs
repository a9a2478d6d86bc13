use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use reduction_bench::arith::formula::FormulaVariant;
use reduction_bench::engine::types::{
    DEFAULT_ARRAY_LEN, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_THRESHOLD, DEFAULT_WORKERS,
};
use reduction_bench::engine::random::MAX_FILL_LEN;
use reduction_bench::harness::BenchConfig;

/// Default iteration count of the statistics stress loop.
pub const DEFAULT_STATS_ITERATIONS: u64 = 500_000_000;

/// Default `x` of the series-sum benchmark.
pub const DEFAULT_EQUATION_X: f64 = 10.0;

/// Default term count of the series-sum benchmark.
pub const DEFAULT_EQUATION_TERMS: u32 = 1_000_000;

fn fill_len() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=MAX_FILL_LEN as u64)
}

/// Sequential vs. parallel reduction micro-benchmarks
///
/// Without a subcommand every benchmark runs once at reduced size.
#[derive(Parser, Debug)]
#[command(name = "reduction-bench", version, about)]
pub struct BenchArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Write a Chrome trace of every reduction to this file
    /// (requires the `profiling` feature)
    #[arg(long, global = true, value_name = "PATH")]
    pub trace: Option<String>,
}

/// Warmup / measured run counts. Unset counts fall back to the benchmark's own
/// defaults.
#[derive(Args, Debug, Clone, Copy)]
pub struct RunArgs {
    /// Measured runs [default: depends on the benchmark]
    #[arg(long)]
    pub runs: Option<u32>,

    /// Discarded warmup runs [default: depends on the benchmark]
    #[arg(long)]
    pub warmup: Option<u32>,
}

impl RunArgs {
    pub fn or(self, defaults: BenchConfig) -> BenchConfig {
        BenchConfig {
            warmup: self.warmup.unwrap_or(defaults.warmup),
            runs: self.runs.unwrap_or(defaults.runs),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sum 0..SIZE with a single accumulator
    SequentialSum {
        /// Number of array elements
        #[arg(long, default_value_t = DEFAULT_ARRAY_LEN, value_parser = fill_len())]
        size: usize,

        #[command(flatten)]
        runs: RunArgs,
    },

    /// Sum 0..SIZE with one chunk per worker on a fixed pool
    ParallelSum {
        /// Number of array elements
        #[arg(long, default_value_t = DEFAULT_ARRAY_LEN, value_parser = fill_len())]
        size: usize,

        /// Chunks / worker threads
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        #[command(flatten)]
        runs: RunArgs,
    },

    /// Sum 0..SIZE with recursive fork/join on a work-stealing pool
    ForkJoinSum {
        /// Number of array elements
        #[arg(long, default_value_t = DEFAULT_ARRAY_LEN, value_parser = fill_len())]
        size: usize,

        /// Largest range summed without splitting
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: usize,

        /// Worker threads (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,

        #[command(flatten)]
        runs: RunArgs,
    },

    /// Multiply a random matrix by a random vector, sequentially and by row ranges
    Matvec {
        /// Matrix rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,

        /// Matrix columns / vector length
        #[arg(long, default_value_t = DEFAULT_COLS)]
        cols: usize,

        /// Worker threads (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,

        /// Input generator seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Evaluate a long series sum sequentially and in parallel
    Equation {
        /// Series argument
        #[arg(long, default_value_t = DEFAULT_EQUATION_X, allow_negative_numbers = true)]
        x: f64,

        /// Number of terms
        #[arg(long, default_value_t = DEFAULT_EQUATION_TERMS)]
        terms: u32,
    },

    /// Evaluate one expression under several hand-optimized rewrites
    Formula {
        #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
        y: f64,

        /// Only evaluate this rewrite
        #[arg(long, value_enum)]
        variant: Option<FormulaVariant>,
    },

    /// Stress the summary-statistics accumulator
    Stats {
        /// Loop iterations (five values are added per iteration)
        #[arg(long, default_value_t = DEFAULT_STATS_ITERATIONS)]
        iterations: u64,
    },

    /// Run every benchmark once at reduced size
    All,
}
