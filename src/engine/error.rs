//! Error types for reducer dispatch and matrix shape validation.
//!
//! The reducers follow a **fail-fast** policy: a single failed unit of work
//! invalidates the whole computation, partial results from the other units are
//! discarded, and nothing is retried. The types here carry enough context to
//! say *which* unit failed and why.
//!
//! ## Layout
//! * [`ShapeError`]: matrix/vector dimension problems, detected before any
//!   work is dispatched.
//! * [`ReduceError`]: the aggregate error returned by every reducer. Lower
//!   level errors convert into it via `From`, so reducer code can use `?`.
//!
//! ## Panics inside work units
//! Rust threads cannot be interrupted while waiting on a join. The equivalent
//! fatal condition is a work unit that panics: the pool catches the unwind,
//! records it as [`ReduceError::TaskPanicked`], and the caller receives the
//! error only after the pool has been torn down.
//!
//! ## Example
//! ```
//! use reduction_bench::engine::error::{ReduceError, ShapeError};
//!
//! let err: ReduceError = ShapeError::VectorLength { expected: 3, actual: 2 }.into();
//! assert_eq!(err.to_string(), "vector length mismatch (matrix has 3 columns, vector has 2 elements)");
//! ```

use std::any::Any;
use std::fmt;

/// Returned when matrix and vector dimensions are incompatible, or when a
/// matrix is built from rows of different lengths.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {

    /// The vector length does not match the matrix column count.
    VectorLength {
        /// Matrix column count.
        expected: usize,

        /// Supplied vector length.
        actual: usize,
    },

    /// A row passed to a matrix constructor has the wrong length.
    RaggedRow {
        /// Offending row index.
        row: usize,

        /// Length of the first row.
        expected: usize,

        /// Length of the offending row.
        actual: usize,
    },

    /// A flat buffer does not hold exactly `rows * cols` values.
    BufferLength {
        /// `rows * cols`.
        expected: usize,

        /// Supplied buffer length.
        actual: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::VectorLength { expected, actual } => write!(
                f,
                "vector length mismatch (matrix has {} columns, vector has {} elements)",
                expected, actual
            ),
            ShapeError::RaggedRow { row, expected, actual } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, actual, expected
            ),
            ShapeError::BufferLength { expected, actual } => write!(
                f,
                "matrix buffer holds {} values, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Aggregate error for every reducer in the crate.
///
/// ### Variants
/// * `InvalidWorkerCount`: a pool of zero workers was requested.
/// * `PoolBuild`: the OS refused to start the worker threads.
/// * `TaskPanicked`: a work unit panicked; the computation is abandoned.
/// * `TaskIncomplete`: a result slot was never written. This indicates an
///   internal invariant violation in the pool.
/// * `Shape`: invalid matrix/vector dimensions.
///
/// ### Display
/// Single-line messages suitable for stderr.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {

    /// A worker pool of this size cannot be created.
    InvalidWorkerCount(usize),

    /// The worker pool failed to start.
    PoolBuild(String),

    /// A work unit panicked while running.
    TaskPanicked {
        /// Dispatch index of the failed unit.
        task: usize,

        /// Panic payload, when it was a string.
        message: String,
    },

    /// A work unit finished without producing a result.
    TaskIncomplete {
        /// Dispatch index of the unit whose slot stayed empty.
        task: usize,
    },

    /// Input dimensions were invalid.
    Shape(ShapeError),
}

impl ReduceError {
    /// Builds a [`ReduceError::TaskPanicked`] from a caught unwind payload.
    pub fn from_panic(task: usize, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::from("non-string panic payload")
        };
        ReduceError::TaskPanicked { task, message }
    }
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::InvalidWorkerCount(n) => {
                write!(f, "invalid worker count {} (need at least 1)", n)
            }
            ReduceError::PoolBuild(reason) => write!(f, "failed to start worker pool: {}", reason),
            ReduceError::TaskPanicked { task, message } => {
                write!(f, "work unit {} panicked: {}", task, message)
            }
            ReduceError::TaskIncomplete { task } => {
                write!(f, "work unit {} finished without a result", task)
            }
            ReduceError::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReduceError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for ReduceError {
    fn from(e: ShapeError) -> Self { ReduceError::Shape(e) }
}

impl From<rayon::ThreadPoolBuildError> for ReduceError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self { ReduceError::PoolBuild(e.to_string()) }
}

/// Result alias used throughout the reducer core.
pub type ReduceResult<T> = Result<T, ReduceError>;
