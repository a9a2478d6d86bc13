//! Deterministic input generation for the benchmarks.
//!
//! Two kinds of input are produced:
//!
//! - **Sequential fill**: `0, 1, …, len - 1`, used by the array-sum
//!   benchmarks so the expected total has a closed form.
//! - **Pseudo-random fill**: uniform `f64` in `[0, 1)`, used for the matrix
//!   and vector of the matrix-vector benchmark.
//!
//! # Design
//!
//! [`InputGenerator`] is a **xorshift64\*** generator with its state held by
//! value. Given the same seed it produces the same sequence on every run and
//! every platform, which keeps benchmark inputs reproducible.
//!
//! # Non-goals
//!
//! - This generator is **not cryptographically secure**.
//! - Output quality is sufficient for benchmark inputs, not for statistics.

use crate::engine::matvec::Matrix;
use crate::engine::types::DEFAULT_SEED;

/// Longest sequential fill whose elements all fit in `i32`.
pub const MAX_FILL_LEN: usize = i32::MAX as usize + 1;

/// Returns `0, 1, …, len - 1` as `i32`.
///
/// ## Panics
/// Panics if `len` exceeds [`MAX_FILL_LEN`].
pub fn sequential_fill(len: usize) -> Vec<i32> {
    assert!(len <= MAX_FILL_LEN, "sequential fill of {len} elements overflows i32");
    (0..len).map(|i| i as i32).collect()
}

/// Closed-form sum of `0 + 1 + … + (len - 1)`.
#[inline]
pub fn sequential_fill_sum(len: usize) -> i64 {
    let n = len as i64;
    if n == 0 { 0 } else { n * (n - 1) / 2 }
}

/// Seeded xorshift64* generator.
#[derive(Clone, Debug)]
pub struct InputGenerator {
    state: u64,
}

impl InputGenerator {
    /// Creates a generator from `seed`.
    ///
    /// xorshift has a fixed point at zero, so a zero seed is replaced with the
    /// default seed.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Next pseudo-random `u64`.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Next uniform `f64` in `[0, 1)`, built from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// `len` uniform values in `[0, 1)`.
    pub fn fill_f64(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.next_f64()).collect()
    }

    /// `rows × cols` matrix of uniform values in `[0, 1)`, filled row by row.
    pub fn random_matrix(&mut self, rows: usize, cols: usize) -> Matrix {
        let data = self.fill_f64(rows * cols);
        Matrix::from_vec(rows, cols, data)
            .unwrap_or_else(|_| unreachable!("buffer is generated with rows * cols values"))
    }
}

impl Default for InputGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
