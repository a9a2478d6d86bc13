//! Divide-and-conquer reducer on a work-stealing pool.
//!
//! A range larger than the threshold is split at its midpoint. The left half
//! is forked (pushed onto the current worker's deque where an idle worker may
//! steal it), the right half is reduced inline, and the parent joins both and
//! returns `left + right`. Ranges of at most `threshold` elements are summed
//! directly.
//!
//! ## Recursion shape
//! * The tree is balanced with depth `O(log(N / T))`.
//! * Recursion always terminates: each split strictly shrinks the range, and
//!   the threshold is never smaller than 1.
//!
//! ## Choosing the threshold
//! Leaves must do enough work that forking overhead is negligible. Too small a
//! threshold floods the deques with tiny tasks; too large a threshold leaves
//! workers idle. A threshold at least as large as the input degenerates into a
//! purely sequential sum (on one pool thread) with the same result.

use std::panic::{self, AssertUnwindSafe};

use crate::engine::error::{ReduceError, ReduceResult};
use crate::engine::pool::WorkerPool;
use crate::engine::sequential;
use crate::engine::types::{Reducible, WorkRange, DEFAULT_THRESHOLD};
use crate::profiling::profiler::{self, Arg};

/// Recursive fork/join summation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivideAndConquerReducer {
    threshold: usize,
    workers: Option<usize>,
}

impl DivideAndConquerReducer {
    /// Creates a reducer with leaf size `threshold`.
    ///
    /// A threshold of `0` is raised to `1`, the smallest leaf that still
    /// guarantees termination. The pool is sized to the available parallelism.
    pub fn new(threshold: usize) -> Self {
        Self { threshold: threshold.max(1), workers: None }
    }

    /// Uses exactly `workers` threads instead of the available parallelism.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Effective leaf size.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn pool_size(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Sums `input` with recursive fork/join.
    ///
    /// An empty input returns `0` without starting the pool.
    ///
    /// ## Errors
    /// * Invalid worker count or pool start-up failure.
    /// * [`ReduceError::TaskPanicked`] if any leaf panics. The whole
    ///   computation is abandoned.

    pub fn sum<T: Reducible>(&self, input: &[T]) -> ReduceResult<T::Acc> {
        if input.is_empty() {
            return Ok(T::Acc::default());
        }

        let _g = profiler::span("fork_join::sum")
            .arg("len", Arg::U64(input.len() as u64))
            .arg("threshold", Arg::U64(self.threshold as u64));

        let threshold = self.threshold;
        WorkerPool::scoped(self.pool_size(), |pool| {
            pool.install(|| {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    compute(input, WorkRange::new(0, input.len()), threshold)
                }))
                .map_err(|payload| ReduceError::from_panic(0, payload))
            })
        })
    }
}

impl Default for DivideAndConquerReducer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Reduces `range` of `input`, forking the left half when the range exceeds
/// `threshold`.
///
/// Must run inside a pool's `install` for the fork to land on that pool.
pub fn compute<T: Reducible>(input: &[T], range: WorkRange, threshold: usize) -> T::Acc {
    if range.len() <= threshold {
        let _g = profiler::span("fork_join::leaf")
            .arg("start", Arg::U64(range.start as u64))
            .arg("end", Arg::U64(range.end as u64));
        return sequential::sum(range.slice(input));
    }

    let (left, right) = range.split();

    // rayon runs the first closure inline and exposes the second for stealing.
    let (right_sum, left_sum) = rayon::join(
        || compute(input, right, threshold),
        || compute(input, left, threshold),
    );
    left_sum + right_sum
}
