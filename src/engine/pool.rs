//! Scoped, bounded worker pool.
//!
//! This module is responsible for:
//! * creating a pool of exactly `P` worker threads for the duration of one
//!   computation,
//! * dispatching one closure per unit of work and collecting its result,
//! * blocking the caller at a single join point,
//! * tearing the pool down on every exit path.
//!
//! ## Lifetime
//!
//! A [`WorkerPool`] only exists inside [`WorkerPool::scoped`]. The worker
//! threads are spawned inside a `std::thread::scope`; after the body returns
//! the pool is stopped and every thread is joined before `scoped` returns,
//! whether the body returned `Ok`, `Err`, or unwound. Callers never observe an
//! error while worker threads are still alive. [`WorkerPool::live_workers`]
//! counts the threads currently running across all pools.
//!
//! ## Result slots
//!
//! [`WorkerPool::dispatch`] allocates one slot per unit. Each slot is handed
//! as an exclusive `&mut` to exactly one unit, written once, and read by the
//! caller only after the dispatch scope has joined. No locks or atomics are
//! involved.
//!
//! ## Failure
//!
//! Each unit runs under `catch_unwind`. A panicking unit turns into
//! [`ReduceError::TaskPanicked`]; the caller gets the failure with the lowest
//! dispatch index, and every partial result is dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::engine::error::{ReduceError, ReduceResult};
use crate::profiling::profiler;

static LIVE_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// A fixed-size pool of worker threads, valid for one computation.
pub struct WorkerPool<'p> {
    inner: &'p ThreadPool,
    workers: usize,
}

impl WorkerPool<'_> {

    /// Creates a pool of `workers` threads, runs `body` with it, and shuts the
    /// pool down before returning.
    ///
    /// ## Errors
    /// * [`ReduceError::InvalidWorkerCount`] if `workers == 0`.
    /// * [`ReduceError::PoolBuild`] if the threads could not be spawned.
    /// * Anything `body` returns.

    pub fn scoped<R>(
        workers: usize,
        body: impl FnOnce(&WorkerPool<'_>) -> ReduceResult<R>,
    ) -> ReduceResult<R> {
        if workers == 0 {
            return Err(ReduceError::InvalidWorkerCount(workers));
        }

        ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("reduce-worker-{i}"))
            .start_handler(|i| {
                LIVE_WORKERS.fetch_add(1, Ordering::SeqCst);
                profiler::thread_name(format!("reduce-worker-{i}"));
            })
            .exit_handler(|_| {
                LIVE_WORKERS.fetch_sub(1, Ordering::SeqCst);
            })
            // Threads live in a `std::thread::scope` and are joined before
            // `build_scoped` returns.
            .build_scoped(
                |thread| thread.run(),
                |inner| body(&WorkerPool { inner, workers }),
            )?
    }

    /// Number of pool worker threads currently running, across every pool in
    /// the process.
    ///
    /// Always `0` between computations on a single thread, since
    /// [`WorkerPool::scoped`] joins its workers before returning.
    pub fn live_workers() -> usize {
        LIVE_WORKERS.load(Ordering::SeqCst)
    }

    /// Number of worker threads in the pool.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` on one of the pool's threads.
    ///
    /// Any `rayon::join` performed inside `op` forks onto this pool's
    /// work-stealing deques rather than the global pool.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        self.inner.install(op)
    }

    /// Dispatches one unit of work per element of `units` and joins them.
    ///
    /// ## Semantics
    /// * `task(index, unit)` runs once per unit, possibly concurrently with the
    ///   others.
    /// * The returned vector is in **dispatch order**, independent of which
    ///   worker finished first.
    /// * If any unit fails or panics, the failure with the lowest index is
    ///   returned and every other result is discarded.

    pub fn dispatch<I, R, F>(&self, units: Vec<I>, task: F) -> ReduceResult<Vec<R>>
    where
        I: Send,
        R: Send,
        F: Fn(usize, I) -> ReduceResult<R> + Sync,
    {
        let mut slots: Vec<Option<ReduceResult<R>>> = Vec::with_capacity(units.len());
        slots.resize_with(units.len(), || None);

        let task = &task;
        self.inner.scope(|scope| {
            for (index, (unit, slot)) in units.into_iter().zip(slots.iter_mut()).enumerate() {
                scope.spawn(move |_| {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(index, unit)));
                    *slot = Some(match outcome {
                        Ok(result) => result,
                        Err(payload) => Err(ReduceError::from_panic(index, payload)),
                    });
                });
            }
        });

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| Err(ReduceError::TaskIncomplete { task: index }))
            })
            .collect()
    }
}
