//! Fixed-pool reducer.
//!
//! Splits the input into exactly `P` contiguous work ranges (remainder folded
//! into the last range), dispatches one reduction per range to a pool of `P`
//! workers, and combines the `P` partial results on the calling thread.
//!
//! ## Execution model
//! A reduction proceeds in two phases:
//!
//! 1. **Parallel accumulation**
//!    * Each worker processes one disjoint range.
//!    * Each worker owns its accumulator; nothing is shared while folding.
//!
//! 2. **Deterministic combination**
//!    * After the join point, partial results are combined in range order.
//!    * The order does not depend on which worker finished first, so floating
//!      point totals are bit-identical across runs for a fixed `P`.
//!
//! ## Usage example
//! ```
//! use reduction_bench::engine::fixed_pool::FixedPoolReducer;
//!
//! let input: Vec<i32> = (0..1000).collect();
//! let reducer = FixedPoolReducer::new(4);
//! assert_eq!(reducer.sum(&input).unwrap(), 499_500);
//! ```

use crate::engine::error::ReduceResult;
use crate::engine::partition::{covers_exactly, fixed_ranges};
use crate::engine::pool::WorkerPool;
use crate::engine::sequential;
use crate::engine::types::{Reducible, WorkRange};
use crate::profiling::profiler::{self, Arg};

/// Reducer that uses a fixed number of equally sized chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPoolReducer {
    workers: usize,
}

impl FixedPoolReducer {
    /// Creates a reducer with `workers` chunks and worker threads.
    ///
    /// A zero worker count is reported as an error when a reduction is
    /// dispatched.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Number of chunks / worker threads.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sums `input` in parallel.
    ///
    /// The result equals [`sequential::sum`] exactly for integer inputs. An
    /// empty input returns `0` without starting any worker.
    pub fn sum<T: Reducible>(&self, input: &[T]) -> ReduceResult<T::Acc> {
        self.reduce_with(
            input,
            T::Acc::default,
            |acc, chunk| *acc = *acc + sequential::sum(chunk),
            |acc, part| *acc = *acc + part,
        )
    }

    /// General map-reduce over `input`.
    ///
    /// ## Semantics
    /// * `init` creates a fresh accumulator for each range.
    /// * `fold` reduces one range (given as a slice) into its accumulator.
    /// * `combine` merges partial results into the total, in range order,
    ///   starting from `init()`.
    ///
    /// ## Errors
    /// * Invalid worker count or pool start-up failure.
    /// * [`ReduceError::TaskPanicked`](crate::engine::error::ReduceError) if
    ///   any `fold` panics; no partial total is returned.

    pub fn reduce_with<T, A, I, F, C>(
        &self,
        input: &[T],
        init: I,
        fold: F,
        combine: C,
    ) -> ReduceResult<A>
    where
        T: Sync,
        A: Send,
        I: Fn() -> A + Sync,
        F: Fn(&mut A, &[T]) + Sync,
        C: Fn(&mut A, A),
    {
        let partials = self.partials(input, &init, &fold)?;

        let mut total = init();
        for part in partials {
            combine(&mut total, part);
        }
        Ok(total)
    }

    /// Runs the parallel accumulation phase and returns the per-range partial
    /// results in range order.
    ///
    /// An empty input produces no partial results and dispatches nothing.
    pub fn partials<T, A, I, F>(&self, input: &[T], init: I, fold: F) -> ReduceResult<Vec<A>>
    where
        T: Sync,
        A: Send,
        I: Fn() -> A + Sync,
        F: Fn(&mut A, &[T]) + Sync,
    {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let ranges = fixed_ranges(input.len(), self.workers.max(1));
        debug_assert!(covers_exactly(&ranges, input.len()));

        let _g = profiler::span("fixed_pool::sum")
            .arg("len", Arg::U64(input.len() as u64))
            .arg("workers", Arg::U64(self.workers as u64));

        WorkerPool::scoped(self.workers, |pool| {
            pool.dispatch(ranges, |task, range: WorkRange| {
                let _g = profiler::span("fixed_pool::chunk")
                    .arg("task", Arg::U64(task as u64))
                    .arg("start", Arg::U64(range.start as u64))
                    .arg("end", Arg::U64(range.end as u64));

                let mut acc = init();
                fold(&mut acc, range.slice(input));
                Ok(acc)
            })
        })
    }
}

impl Default for FixedPoolReducer {
    fn default() -> Self {
        Self::new(crate::engine::types::DEFAULT_WORKERS)
    }
}
