#![cfg(feature = "profiling")]

// cargo test --features profiling --test profiling

use reduction_bench::profiling::profiler;
use reduction_bench::FixedPoolReducer;

#[test]
fn reductions_are_written_as_chrome_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace").join("reduce.json");

    profiler::init(&path);
    let input: Vec<i32> = (0..1000).collect();
    assert_eq!(FixedPoolReducer::new(4).sum(&input).unwrap(), 499_500);
    profiler::shutdown();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let events = json["traceEvents"].as_array().unwrap();

    let chunks: Vec<_> = events
        .iter()
        .filter(|e| e["name"] == "fixed_pool::chunk")
        .collect();
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|e| e["ph"] == "X" && e["cat"] == "reduce"));

    let mut tasks: Vec<u64> = chunks.iter().map(|e| e["args"]["task"].as_u64().unwrap()).collect();
    tasks.sort_unstable();
    assert_eq!(tasks, vec![0, 1, 2, 3]);

    assert!(events.iter().any(|e| e["name"] == "fixed_pool::sum"));
    assert!(events.iter().any(|e| e["ph"] == "M"));
}
