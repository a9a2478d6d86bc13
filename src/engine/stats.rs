//! Summary statistics accumulator.
//!
//! [`SummaryStatistics`] is a plain data container that tracks count, sum,
//! minimum, maximum, mean, and variance of a stream of values in a single
//! pass. It carries no thread or pool state and is `Copy`, so it can be used
//! as a per-range accumulator in
//! [`FixedPoolReducer::reduce_with`](crate::engine::fixed_pool::FixedPoolReducer::reduce_with).
//!
//! ## Algorithm
//! Mean and variance use Welford's online update. Two accumulators are merged
//! with the pairwise formula of Chan, Golub and LeVeque, so statistics can be
//! built per range in parallel and combined in range order.
//!
//! ## Usage example
//! ```
//! use reduction_bench::engine::stats::SummaryStatistics;
//!
//! let mut stats = SummaryStatistics::new();
//! for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     stats.add_value(x);
//! }
//! assert_eq!(stats.n(), 8);
//! assert!((stats.mean() - 5.0).abs() < 1e-12);
//! assert_eq!(stats.sum(), 40.0);
//! ```
//!
//! ## References
//! * Welford, B. P. (1962). *Note on a method for calculating corrected sums of
//!   squares and products*.
//! * Chan, T. F., Golub, G. H., LeVeque, R. J. (1979). *Updating formulae and a
//!   pairwise algorithm for computing sample variances*.

use std::fmt;

/// Single-pass descriptive statistics.
///
/// ## Empty accumulator
/// * `n() == 0`, `sum() == 0`
/// * `mean()`, `min()`, `max()` are `NaN`
/// * `variance()` is `0`

#[derive(Clone, Copy, Debug)]
pub struct SummaryStatistics {
    n: u64,
    sum: f64,
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        Self {
            n: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
        }
    }
}

impl SummaryStatistics {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Incorporates one value.
    #[inline]
    pub fn add_value(&mut self, x: f64) {
        self.n += 1;
        self.sum += x;
        self.min = self.min.min(x);
        self.max = self.max.max(x);

        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Merges `other` into `self`.
    ///
    /// Merging is deterministic: combining the same accumulators in the same
    /// order always yields the same bits.
    pub fn combine(&mut self, other: &SummaryStatistics) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }

        let n_a = self.n as f64;
        let n_b = other.n as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.n += other.n;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of values added.
    #[inline]
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Sum of all values.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest value, or `NaN` when empty.
    #[inline]
    pub fn min(&self) -> f64 {
        if self.n == 0 { f64::NAN } else { self.min }
    }

    /// Largest value, or `NaN` when empty.
    #[inline]
    pub fn max(&self) -> f64 {
        if self.n == 0 { f64::NAN } else { self.max }
    }

    /// Arithmetic mean, or `NaN` when empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.n == 0 { f64::NAN } else { self.mean }
    }

    /// Unbiased sample variance.
    pub fn variance(&self) -> f64 {
        if self.n > 1 {
            self.m2 / (self.n - 1) as f64
        } else {
            0.0
        }
    }

    /// Sample standard deviation.
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SummaryStatistics:")?;
        writeln!(f, "n: {}", self.n())?;
        writeln!(f, "min: {}", self.min())?;
        writeln!(f, "max: {}", self.max())?;
        writeln!(f, "sum: {}", self.sum())?;
        writeln!(f, "mean: {}", self.mean())?;
        writeln!(f, "variance: {}", self.variance())?;
        write!(f, "standard deviation: {}", self.standard_deviation())
    }
}

/// Accumulator stress loop.
///
/// Each iteration adds `i + 1 ..= i + 5` and then reads every statistic, so
/// both the update and the query paths are exercised on every step.
pub fn stress(iterations: u64) -> SummaryStatistics {
    let mut stats = SummaryStatistics::new();
    for i in 0..iterations {
        let base = i as f64;
        for k in 1..=5 {
            stats.add_value(base + k as f64);
        }
        std::hint::black_box((
            stats.mean(),
            stats.standard_deviation(),
            stats.min(),
            stats.max(),
            stats.n(),
            stats.sum(),
        ));
    }
    stats
}
