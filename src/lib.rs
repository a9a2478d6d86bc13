//! # Reduction Bench
//!
//! Micro-benchmarks comparing sequential and parallel implementations of
//! simple numeric reductions.
//!
//! ## Reducers
//! - **Fixed pool**: `P` contiguous chunks, one per worker, partial sums
//!   combined in chunk order
//! - **Divide and conquer**: recursive midpoint splitting on a work-stealing
//!   pool down to a leaf threshold
//! - **Matrix-vector**: `P` row ranges, each worker writing its own disjoint
//!   slice of the result
//!
//! Every parallel reducer produces exactly the sequential result for integer
//! inputs, and a bit-reproducible result for floating-point inputs.
//!
//! ## Design Goals
//! - Exact partitioning (no gap, no overlap)
//! - Deterministic combination order
//! - Scoped worker pools that are always torn down
//! - Fail-fast error propagation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod arith;
pub mod harness;
pub mod profiling;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use engine::types::{
    Reducible,
    WorkRange,
};

pub use engine::error::{
    ReduceError,
    ReduceResult,
    ShapeError,
};

pub use engine::partition::fixed_ranges;
pub use engine::pool::WorkerPool;
pub use engine::fixed_pool::FixedPoolReducer;
pub use engine::fork_join::DivideAndConquerReducer;
pub use engine::matvec::{
    Matrix,
    MatVecReducer,
};
pub use engine::stats::SummaryStatistics;
pub use engine::random::InputGenerator;

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used reducer types.
///
/// Import with:
/// ```rust
/// use reduction_bench::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DivideAndConquerReducer,
        FixedPoolReducer,
        Matrix,
        MatVecReducer,
        ReduceError,
        ReduceResult,
        Reducible,
        SummaryStatistics,
        WorkRange,
    };
    pub use crate::engine::sequential;
}
