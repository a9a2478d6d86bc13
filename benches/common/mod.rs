#![allow(dead_code)]

use reduction_bench::engine::random::{sequential_fill, InputGenerator};
use reduction_bench::Matrix;

pub const ELEMENTS_SMALL: usize = 100_000;
pub const ELEMENTS_MED: usize = 1_000_000;
pub const ELEMENTS_LARGE: usize = 10_000_000;

pub const MATRIX_ROWS: usize = 10_000;
pub const MATRIX_COLS: usize = 1000;

pub fn sum_input(len: usize) -> Vec<i32> {
    sequential_fill(len)
}

pub fn matvec_input(rows: usize, cols: usize) -> (Matrix, Vec<f64>) {
    let mut gen = InputGenerator::new(42);
    let matrix = gen.random_matrix(rows, cols);
    let vector = gen.fill_f64(cols);
    (matrix, vector)
}
