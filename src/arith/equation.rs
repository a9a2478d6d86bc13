//! Series-sum micro-benchmark.
//!
//! Evaluates
//!
//! ```text
//! Σ_{i=1..n} [ x^min(i,100) · ln(x+i) / (sin(x+i²) + 1e-10) + e^cos(x) · √(x+i) ] + g(x)
//! ```
//!
//! sequentially and with a data-parallel iterator.
//!
//! ## Domain handling
//! This benchmark never fails: a non-positive logarithm argument is clamped to
//! `1e-10` and a negative square-root argument is clamped to `0`, so every term
//! is a finite number (or an IEEE infinity for extreme `x`), never `NaN` from a
//! domain error.

use rayon::prelude::*;

/// Smallest logarithm argument used in place of non-positive values.
pub const LOG_FLOOR: f64 = 1e-10;

/// Offset added to the sine denominator to keep it away from zero.
pub const SIN_EPSILON: f64 = 1e-10;

/// Largest exponent applied to `x`.
pub const MAX_POWER: i32 = 100;

/// `1` when `x < 1`, otherwise `x / 2 + g(x / 2)`.
pub fn g(x: f64) -> f64 {
    if x < 1.0 {
        1.0
    } else {
        x / 2.0 + g(x / 2.0)
    }
}

/// Term `i` of the series, with clamped logarithm and square-root arguments.
#[inline]
pub fn term(x: f64, i: u32) -> f64 {
    let shifted = x + f64::from(i);

    let log_arg = if shifted <= 0.0 { LOG_FLOOR } else { shifted };
    let power = i.min(MAX_POWER as u32) as i32;
    let i_sq = f64::from(i) * f64::from(i);
    let first = x.powi(power) * log_arg.ln() / ((x + i_sq).sin() + SIN_EPSILON);

    let sqrt_arg = shifted.max(0.0);
    let second = x.cos().exp() * sqrt_arg.sqrt();

    first + second
}

/// Sums terms `1..=n` in order on the calling thread, then adds `g(x)`.
pub fn complex_equation_sequential(x: f64, n: u32) -> f64 {
    let mut result = 0.0;
    for i in 1..=n {
        result += term(x, i);
    }
    result + g(x)
}

/// Sums terms `1..=n` on the global rayon pool, then adds `g(x)`.
///
/// Agrees with [`complex_equation_sequential`] up to floating-point
/// reassociation.
pub fn complex_equation_parallel(x: f64, n: u32) -> f64 {
    (1..=n).into_par_iter().map(|i| term(x, i)).sum::<f64>() + g(x)
}
