//! Arithmetic micro-benchmarks.
//!
//! Pure floating-point workloads with no shared state:
//! - [`equation`]: a long series sum, sequential vs. data-parallel
//! - [`formula`]: one closed-form expression under several rewrites

pub mod equation;
pub mod formula;
