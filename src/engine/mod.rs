//! # Engine Module
//!
//! The reducer core.
//!
//! This module contains the building blocks shared by every benchmark:
//! - Work ranges and element widening rules
//! - Fixed partitioning
//! - The scoped worker pool
//! - Sequential, fixed-pool, fork/join, and matrix-vector reducers
//! - Summary statistics and input generation
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod partition;
pub mod pool;
pub mod sequential;
pub mod fixed_pool;
pub mod fork_join;
pub mod matvec;
pub mod stats;
pub mod random;
