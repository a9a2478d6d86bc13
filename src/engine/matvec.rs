//! Dense matrices and the parallel matrix-vector reducer.
//!
//! ## Storage
//! [`Matrix`] keeps its values in a single row-major `Vec<f64>`. Row `r` is the
//! slice `data[r * cols..(r + 1) * cols]`.
//!
//! ## Parallel multiply
//! The row space `[0, R)` is split into `P` contiguous ranges with the same
//! remainder-to-last rule as the fixed-pool reducer. The caller owns the
//! result buffer and carves it into `P` disjoint mutable slices, one per
//! range; each worker receives its slice as an exclusive write capability and
//! writes one dot product per row. There is no combination step, and no two
//! workers can ever address the same output index.
//!
//! ## Bit-identical results
//! Both the sequential and the parallel path compute every row with [`dot`],
//! which accumulates left to right with a single accumulator. Per-row
//! accumulation order is therefore identical and the two results are equal bit
//! for bit.

use crate::engine::error::{ReduceResult, ShapeError};
use crate::engine::partition::{covers_exactly, fixed_ranges};
use crate::engine::pool::WorkerPool;
use crate::engine::types::WorkRange;
use crate::profiling::profiler::{self, Arg};

/// Row-major dense matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wraps a row-major buffer.
    ///
    /// ## Errors
    /// [`ShapeError::BufferLength`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength { expected: rows * cols, actual: data.len() });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows.
    ///
    /// ## Errors
    /// [`ShapeError::RaggedRow`] if any row differs in length from the first.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ShapeError::RaggedRow { row, expected: cols, actual: values.len() });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Verifies that `vector` can be multiplied by this matrix.
    pub fn check_vector(&self, vector: &[f64]) -> Result<(), ShapeError> {
        if vector.len() != self.cols {
            return Err(ShapeError::VectorLength { expected: self.cols, actual: vector.len() });
        }
        Ok(())
    }
}

/// Dot product accumulated left to right.
#[inline]
pub fn dot(row: &[f64], vector: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (a, b) in row.iter().zip(vector) {
        sum += a * b;
    }
    sum
}

/// Parallel matrix-vector multiplication over row ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatVecReducer {
    workers: usize,
}

impl MatVecReducer {
    /// Creates a reducer with `workers` row ranges and worker threads.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Creates a reducer sized to the machine's available parallelism.
    pub fn with_available_parallelism() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }

    /// Number of row ranges / worker threads.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Computes `matrix × vector` in parallel.
    ///
    /// ## Errors
    /// * Shape error if `vector.len() != matrix.cols()`.
    /// * Invalid worker count, pool start-up failure, or a panicking worker.

    pub fn multiply(&self, matrix: &Matrix, vector: &[f64]) -> ReduceResult<Vec<f64>> {
        matrix.check_vector(vector)?;

        let mut result = vec![0.0; matrix.rows()];
        if result.is_empty() {
            return Ok(result);
        }

        let ranges = fixed_ranges(matrix.rows(), self.workers.max(1));
        debug_assert!(covers_exactly(&ranges, matrix.rows()));

        let _g = profiler::span("matvec::multiply")
            .arg("rows", Arg::U64(matrix.rows() as u64))
            .arg("cols", Arg::U64(matrix.cols() as u64))
            .arg("workers", Arg::U64(self.workers as u64));

        let units = split_disjoint(&mut result, &ranges);

        WorkerPool::scoped(self.workers, |pool| {
            pool.dispatch(units, |task, (range, out)| {
                let _g = profiler::span("matvec::rows")
                    .arg("task", Arg::U64(task as u64))
                    .arg("start", Arg::U64(range.start as u64))
                    .arg("end", Arg::U64(range.end as u64));

                for (offset, slot) in out.iter_mut().enumerate() {
                    *slot = dot(matrix.row(range.start + offset), vector);
                }
                Ok(())
            })
        })?;

        Ok(result)
    }
}

impl Default for MatVecReducer {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

/// Carves `buffer` into one exclusive mutable slice per range.
///
/// `ranges` must be contiguous and ordered starting at 0, as produced by
/// [`fixed_ranges`].
fn split_disjoint<'a>(
    mut buffer: &'a mut [f64],
    ranges: &[WorkRange],
) -> Vec<(WorkRange, &'a mut [f64])> {
    let mut units = Vec::with_capacity(ranges.len());
    for &range in ranges {
        let (head, tail) = std::mem::take(&mut buffer).split_at_mut(range.len());
        units.push((range, head));
        buffer = tail;
    }
    units
}
