//! Closed-form expression under hand-applied rewrites.
//!
//! Every variant evaluates
//!
//! ```text
//! (3x² + 5x)(y² − y) + (2x² + x)(2y + 1) + (x + y)² / 2
//! ```
//!
//! and differs only in how much common work is hoisted into locals.

use std::fmt;

/// Direct transcription of the expression.
#[inline]
pub fn original(x: f64, y: f64) -> f64 {
    (3.0 * x * x + 5.0 * x) * (y * y - y)
        + (2.0 * x * x + x) * (2.0 * y + 1.0)
        + (x + y).powi(2) / 2.0
}

/// Squares and `x + y` computed once.
#[inline]
pub fn optimized_locals(x: f64, y: f64) -> f64 {
    let x2 = x * x;
    let y2 = y * y;
    let xy = x + y;
    let yy_minus_y = y2 - y;

    (3.0 * x2 + 5.0 * x) * yy_minus_y + (2.0 * x2 + x) * (2.0 * y + 1.0) + (xy * xy) / 2.0
}

/// Every parenthesized factor computed once.
#[inline]
pub fn optimized_terms(x: f64, y: f64) -> f64 {
    let x2 = x * x;
    let y2 = y * y;
    let xy = x + y;
    let yy_minus_y = y2 - y;

    let a = 3.0 * x2 + 5.0 * x;
    let b = 2.0 * x2 + x;
    let c = 2.0 * y + 1.0;

    a * yy_minus_y + b * c + (xy * xy) / 2.0
}

/// Factors of the expression, computed ahead of evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precomputed {
    /// `3x² + 5x`
    pub a: f64,

    /// `2x² + x`
    pub b: f64,

    /// `2y + 1`
    pub c: f64,

    /// `x + y`
    pub xy: f64,

    /// `y² − y`
    pub yy_minus_y: f64,
}

impl Precomputed {
    /// Computes every factor for `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        let x2 = x * x;
        Self {
            a: 3.0 * x2 + 5.0 * x,
            b: 2.0 * x2 + x,
            c: 2.0 * y + 1.0,
            xy: x + y,
            yy_minus_y: y * y - y,
        }
    }
}

/// Evaluates the expression from precomputed factors.
#[inline]
pub fn optimized_precomputed(p: &Precomputed) -> f64 {
    p.a * p.yy_minus_y + p.b * p.c + p.xy.powi(2) / 2.0
}

/// The rewrites, in the order they are benchmarked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormulaVariant {
    /// [`original`]
    Original,
    /// [`optimized_locals`]
    Locals,
    /// [`optimized_terms`]
    Terms,
    /// [`Precomputed::new`] followed by [`optimized_precomputed`]
    Precomputed,
}

impl FormulaVariant {
    /// All variants in benchmark order.
    pub const ALL: [FormulaVariant; 4] = [
        FormulaVariant::Original,
        FormulaVariant::Locals,
        FormulaVariant::Terms,
        FormulaVariant::Precomputed,
    ];

    /// Evaluates this variant at `(x, y)`.
    pub fn evaluate(self, x: f64, y: f64) -> f64 {
        match self {
            FormulaVariant::Original => original(x, y),
            FormulaVariant::Locals => optimized_locals(x, y),
            FormulaVariant::Terms => optimized_terms(x, y),
            FormulaVariant::Precomputed => optimized_precomputed(&Precomputed::new(x, y)),
        }
    }
}

impl fmt::Display for FormulaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormulaVariant::Original => "original",
            FormulaVariant::Locals => "optimized-locals",
            FormulaVariant::Terms => "optimized-terms",
            FormulaVariant::Precomputed => "optimized-precomputed",
        };
        f.write_str(name)
    }
}
