mod cli;

use std::process::ExitCode;

use clap::Parser;

use cli::{BenchArgs, Command};
use reduction_bench::arith::formula::FormulaVariant;
use reduction_bench::engine::error::ReduceResult;
use reduction_bench::engine::types::{DEFAULT_SEED, DEFAULT_THRESHOLD, DEFAULT_WORKERS};
use reduction_bench::harness::{workloads, BenchConfig, Report};
use reduction_bench::profiling::profiler;

fn main() -> ExitCode {
    let args = BenchArgs::parse();

    if let Some(path) = &args.trace {
        if cfg!(not(feature = "profiling")) {
            eprintln!("--trace has no effect: built without the `profiling` feature");
        }
        profiler::init(path);
        profiler::thread_name("main");
    }

    let outcome = run(args.command.unwrap_or(Command::All));
    profiler::shutdown();

    match outcome {
        Ok(reports) => {
            for report in reports {
                println!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> ReduceResult<Vec<Report>> {
    let report = match command {
        Command::SequentialSum { size, runs } => {
            workloads::sequential_sum(size, runs.or(BenchConfig::SEQUENTIAL_SUM))?
        }
        Command::ParallelSum { size, workers, runs } => {
            workloads::parallel_sum(size, workers, runs.or(BenchConfig::PARALLEL_SUM))?
        }
        Command::ForkJoinSum { size, threshold, workers, runs } => {
            workloads::fork_join_sum(size, threshold, workers, runs.or(BenchConfig::FORK_JOIN_SUM))?
        }
        Command::Matvec { rows, cols, workers, seed } => workloads::matvec(rows, cols, workers, seed)?,
        Command::Equation { x, terms } => workloads::equation(x, terms)?,
        Command::Formula { x, y, variant } => match variant {
            Some(v) => workloads::formula(x, y, &[v])?,
            None => workloads::formula(x, y, &FormulaVariant::ALL)?,
        },
        Command::Stats { iterations } => workloads::stats(iterations)?,
        Command::All => return smoke_run(),
    };
    Ok(vec![report])
}

/// Every benchmark once, sized to finish in seconds.
fn smoke_run() -> ReduceResult<Vec<Report>> {
    const SIZE: usize = 10_000_000;
    let once = BenchConfig::ONCE;

    Ok(vec![
        workloads::sequential_sum(SIZE, once)?,
        workloads::parallel_sum(SIZE, DEFAULT_WORKERS, once)?,
        workloads::fork_join_sum(SIZE, DEFAULT_THRESHOLD / 10, None, once)?,
        workloads::matvec(100_000, 100, None, DEFAULT_SEED)?,
        workloads::equation(10.0, 100_000)?,
        workloads::formula(3.0, 4.0, &FormulaVariant::ALL)?,
        workloads::stats(1_000_000)?,
    ])
}
