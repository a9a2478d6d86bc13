//! Span profiling.
//!
//! A **feature-gated** recorder for reducer dispatches. When the `profiling`
//! feature is enabled, every reduction records one span for the whole
//! dispatch and one span per work unit (with its task index and index range),
//! and [`profiler::shutdown`] writes a **Chrome Trace Event JSON** file that
//! can be opened in:
//!
//! - `chrome://tracing`
//! - <https://ui.perfetto.dev>
//!
//! ```bash
//! cargo run --release --features profiling -- parallel-sum --trace profile/trace.json
//! ```
//!
//! When the feature is disabled all profiling calls compile to no-ops.

pub mod profiler;
