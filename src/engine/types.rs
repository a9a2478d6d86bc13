//! Core reduction types, element widening rules, and default workload sizes.
//!
//! This module defines the **shared vocabulary** of the reducer core. Every
//! reducer (sequential, fixed-pool, fork/join, matrix-vector) speaks in terms
//! of the types declared here:
//!
//! - [`WorkRange`]: a half-open index interval `[start, end)` handed to one
//!   unit of work,
//! - [`Reducible`]: an element type together with the (wider) accumulator it
//!   is summed into,
//! - the `DEFAULT_*` constants that size the benchmark programs when no
//!   command-line override is given.
//!
//! ## Accumulator widening
//!
//! Summing one hundred million `i32` values overflows `i32` long before the
//! end of the array, so integer elements accumulate into `i64`. Floating-point
//! elements accumulate into `f64`. The widening is explicit in
//! [`Reducible::widen`] so that every reducer applies the exact same
//! per-element conversion, which keeps parallel and sequential results
//! identical for integer inputs.

use std::fmt;
use std::ops::Add;

/// Default length of the summed input array.
pub const DEFAULT_ARRAY_LEN: usize = 100_000_000;

/// Default worker count for the fixed-pool reducer.
pub const DEFAULT_WORKERS: usize = 4;

/// Default leaf size for the divide-and-conquer reducer.
///
/// Ranges of at most this many elements are summed directly instead of being
/// split further.
pub const DEFAULT_THRESHOLD: usize = 10_000_000;

/// Default number of matrix rows for the matrix-vector benchmark.
pub const DEFAULT_ROWS: usize = 1_000_000;

/// Default number of matrix columns (and vector length).
pub const DEFAULT_COLS: usize = 1000;

/// Default seed for generated inputs.
pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// A half-open interval `[start, end)` over input indices.
///
/// ## Invariants
/// * `start <= end`
/// * Ranges produced for a single computation never overlap and their union
///   is the full index domain of the input.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkRange {
    /// First index covered by the range.
    pub start: usize,

    /// One past the last index covered by the range.
    pub end: usize,
}

impl WorkRange {
    /// Creates a range. Callers must pass `start <= end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "work range start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Splits the range at its midpoint `(start + end) / 2`.
    ///
    /// The left half is `[start, mid)` and the right half is `[mid, end)`.
    #[inline]
    pub fn split(&self) -> (WorkRange, WorkRange) {
        let mid = self.start + (self.end - self.start) / 2;
        (WorkRange::new(self.start, mid), WorkRange::new(mid, self.end))
    }

    /// Returns the slice of `data` covered by this range.
    #[inline]
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        &data[self.start..self.end]
    }
}

/// An element type that can be summed by the reducers.
///
/// ## Semantics
/// `Acc` is the accumulator type partial results are kept in. It must have an
/// additive identity (`Default`) and be cheap to move between threads.

pub trait Reducible: Copy + Send + Sync {
    /// Accumulator type the element is summed into.
    type Acc: Copy + Default + Send + Sync + Add<Output = Self::Acc> + PartialEq + fmt::Debug;

    /// Converts one element into the accumulator domain.
    fn widen(self) -> Self::Acc;
}

macro_rules! impl_reducible {
    ($($elem:ty => $acc:ty),* $(,)?) => {
        $(
            impl Reducible for $elem {
                type Acc = $acc;

                #[inline(always)]
                fn widen(self) -> $acc {
                    self as $acc
                }
            }
        )*
    };
}

impl_reducible! {
    i8 => i64,
    i16 => i64,
    i32 => i64,
    i64 => i64,
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u64,
    f32 => f64,
    f64 => f64,
}
