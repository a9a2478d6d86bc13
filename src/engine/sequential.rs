//! Sequential baselines.
//!
//! These are the reference results every parallel reducer is checked against.
//! They run on the calling thread with a single accumulator and visit elements
//! in index order.

use crate::engine::error::ReduceResult;
use crate::engine::matvec::{dot, Matrix};
use crate::engine::types::Reducible;

/// Sums `input` in index order into its widened accumulator type.
///
/// An empty input yields the additive identity.
#[inline]
pub fn sum<T: Reducible>(input: &[T]) -> T::Acc {
    let mut acc = T::Acc::default();
    for &x in input {
        acc = acc + x.widen();
    }
    acc
}

/// Multiplies `matrix` by `vector` one row at a time.
///
/// ## Errors
/// Returns a shape error if `vector.len() != matrix.cols()`.
pub fn multiply(matrix: &Matrix, vector: &[f64]) -> ReduceResult<Vec<f64>> {
    matrix.check_vector(vector)?;

    let mut result = vec![0.0; matrix.rows()];
    for (row, out) in result.iter_mut().enumerate() {
        *out = dot(matrix.row(row), vector);
    }
    Ok(result)
}
