//! Chrome Trace span profiling for reducer dispatches.
//!
//! Feature-gated with `--features profiling`. Without the feature every
//! function below is an inlined no-op and `SpanGuard` is a unit struct.
//!
//! Usage:
//!   reduction_bench::profiling::profiler::init("profile/trace.json");
//!   {
//!     let _g = reduction_bench::profiling::profiler::span("fixed_pool::sum");
//!     // dispatch work...
//!   }
//!   reduction_bench::profiling::profiler::shutdown();

use std::path::Path;

#[cfg(feature = "profiling")]
mod enabled {
    use std::cell::Cell;
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Mutex, OnceLock};
    use std::time::Instant;

    use serde::Serialize;
    use serde_json::{Map, Value};

    use super::*;

    const CATEGORY: &str = "reduce";
    const PID: u32 = 1;

    /// One entry of the `traceEvents` array.
    #[derive(Debug, Serialize)]
    struct TraceEvent {
        name: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        cat: Option<&'static str>,
        ph: &'static str,
        ts: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        dur: Option<u64>,
        pid: u32,
        tid: u64,
        #[serde(skip_serializing_if = "Map::is_empty")]
        args: Map<String, Value>,
    }

    #[derive(Serialize)]
    struct TraceFile {
        #[serde(rename = "traceEvents")]
        trace_events: Vec<TraceEvent>,
    }

    struct Recorder {
        start: Instant,
        out_path: PathBuf,
        recording: AtomicBool,
        events: Mutex<Vec<TraceEvent>>,
    }

    static RECORDER: OnceLock<Recorder> = OnceLock::new();
    static NEXT_TID: AtomicU64 = AtomicU64::new(1);

    thread_local! {
        static TID: Cell<u64> = const { Cell::new(0) };
    }

    fn tid() -> u64 {
        TID.with(|t| {
            if t.get() == 0 {
                t.set(NEXT_TID.fetch_add(1, Ordering::Relaxed));
            }
            t.get()
        })
    }

    fn active() -> Option<&'static Recorder> {
        RECORDER.get().filter(|r| r.recording.load(Ordering::Acquire))
    }

    fn elapsed_us(r: &Recorder) -> u64 {
        r.start.elapsed().as_micros() as u64
    }

    fn record(r: &Recorder, ev: TraceEvent) {
        if let Ok(mut events) = r.events.lock() {
            events.push(ev);
        }
    }

    fn to_value(arg: super::Arg) -> Value {
        match arg {
            super::Arg::U64(v) => Value::from(v),
        }
    }

    /// Starts recording; spans are written to `path` on [`shutdown`].
    ///
    /// Only the first call has an effect.
    pub fn init<P: AsRef<Path>>(path: P) {
        let _ = RECORDER.set(Recorder {
            start: Instant::now(),
            out_path: path.as_ref().to_path_buf(),
            recording: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
        });
    }

    /// Stops recording and writes the trace file.
    pub fn shutdown() {
        let Some(r) = RECORDER.get() else { return; };
        r.recording.store(false, Ordering::Release);

        if let Err(e) = write_trace(r) {
            eprintln!("profiler: failed to write {}: {e}", r.out_path.display());
        }
    }

    fn write_trace(r: &Recorder) -> std::io::Result<()> {
        let trace_events = match r.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };

        if let Some(parent) = r.out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut w = BufWriter::new(File::create(&r.out_path)?);
        serde_json::to_writer(&mut w, &TraceFile { trace_events })?;
        w.flush()
    }

    /// Labels the calling thread in the trace viewer.
    pub fn thread_name(name: impl Into<String>) {
        let Some(r) = active() else { return; };
        let mut args = Map::new();
        args.insert("name".into(), Value::String(name.into()));
        record(r, TraceEvent {
            name: "thread_name",
            cat: None,
            ph: "M",
            ts: elapsed_us(r),
            dur: None,
            pid: PID,
            tid: tid(),
            args,
        });
    }

    /// Opens a span that closes when the guard is dropped.
    pub fn span(name: &'static str) -> SpanGuard {
        match active() {
            Some(r) => SpanGuard {
                name,
                ts0: elapsed_us(r),
                tid: tid(),
                args: Map::new(),
                active: true,
            },
            None => SpanGuard::disabled(),
        }
    }

    /// Records a complete (`ph:"X"`) event on drop.
    pub struct SpanGuard {
        name: &'static str,
        ts0: u64,
        tid: u64,
        args: Map<String, Value>,
        active: bool,
    }

    impl SpanGuard {
        fn disabled() -> Self {
            Self { name: "", ts0: 0, tid: 0, args: Map::new(), active: false }
        }

        /// Attaches an argument to this span.
        #[inline]
        pub fn arg(mut self, key: &str, value: super::Arg) -> Self {
            if self.active {
                self.args.insert(key.to_owned(), to_value(value));
            }
            self
        }
    }

    impl Drop for SpanGuard {
        fn drop(&mut self) {
            if !self.active {
                return;
            }
            let Some(r) = RECORDER.get() else { return; };
            let dur = elapsed_us(r).saturating_sub(self.ts0);
            record(r, TraceEvent {
                name: self.name,
                cat: Some(CATEGORY),
                ph: "X",
                ts: self.ts0,
                dur: Some(dur),
                pid: PID,
                tid: self.tid,
                args: std::mem::take(&mut self.args),
            });
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use super::*;

    /// No-op.
    #[inline]
    pub fn init<P: AsRef<Path>>(_path: P) {}

    /// No-op.
    #[inline]
    pub fn shutdown() {}

    /// No-op.
    #[inline]
    pub fn thread_name(_name: impl Into<String>) {}

    /// No-op span.
    #[inline]
    pub fn span(_name: &'static str) -> SpanGuard {
        SpanGuard
    }

    /// Zero-sized span guard.
    pub struct SpanGuard;

    impl SpanGuard {
        /// No-op.
        #[inline]
        pub fn arg(self, _key: &str, _value: super::Arg) -> Self {
            self
        }
    }
}

/// Argument value attached to a span, shown under `args` in the viewer.
pub enum Arg {
    /// Unsigned 64-bit integer value (lengths, indices, counts).
    U64(u64),
}

#[cfg(feature = "profiling")]
pub use enabled::{init, shutdown, span, thread_name, SpanGuard};

#[cfg(not(feature = "profiling"))]
pub use disabled::{init, shutdown, span, thread_name, SpanGuard};
