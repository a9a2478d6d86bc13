use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use reduction_bench::{ReduceError, WorkerPool};

#[test]
fn results_come_back_in_dispatch_order() {
    let out = WorkerPool::scoped(4, |pool| {
        pool.dispatch((0..16u64).collect(), |_, n| {
            // Later units finish first.
            thread::sleep(Duration::from_millis(16 - n));
            Ok(n * n)
        })
    })
    .unwrap();

    assert_eq!(out, (0..16u64).map(|n| n * n).collect::<Vec<_>>());
}

#[test]
fn every_unit_runs_exactly_once() {
    let calls = AtomicUsize::new(0);
    let out = WorkerPool::scoped(3, |pool| {
        pool.dispatch(vec![(); 100], |index, ()| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(index)
        })
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), 100);
    assert_eq!(out, (0..100).collect::<Vec<_>>());
}

#[test]
fn units_can_write_disjoint_slices() {
    let mut buffer = vec![0usize; 12];
    let units: Vec<&mut [usize]> = buffer.chunks_mut(5).collect();

    WorkerPool::scoped(2, |pool| {
        pool.dispatch(units, |index, slice| {
            slice.iter_mut().for_each(|x| *x = index + 1);
            Ok(())
        })
    })
    .unwrap();

    assert_eq!(buffer, vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3]);
}

#[test]
fn first_failure_by_index_wins() {
    let err = WorkerPool::scoped(4, |pool| {
        pool.dispatch((0..8usize).collect(), |index, n| {
            if n == 5 {
                return Err(ReduceError::InvalidWorkerCount(5));
            }
            if n == 2 {
                panic!("unit {index} failed");
            }
            Ok(n)
        })
    })
    .unwrap_err();

    assert_eq!(
        err,
        ReduceError::TaskPanicked { task: 2, message: "unit 2 failed".to_string() }
    );
}

#[test]
fn body_error_is_returned_unchanged() {
    let err = WorkerPool::scoped(2, |pool| -> Result<(), _> {
        assert_eq!(pool.workers(), 2);
        Err(ReduceError::TaskIncomplete { task: 7 })
    })
    .unwrap_err();

    assert_eq!(err, ReduceError::TaskIncomplete { task: 7 });
}

#[test]
fn install_runs_on_pool_threads() {
    let name = WorkerPool::scoped(1, |pool| {
        Ok(pool.install(|| thread::current().name().map(str::to_owned)))
    })
    .unwrap();

    assert_eq!(name.as_deref(), Some("reduce-worker-0"));
}

#[test]
fn zero_workers_is_rejected() {
    let err = WorkerPool::scoped(0, |_| Ok(())).unwrap_err();
    assert_eq!(err, ReduceError::InvalidWorkerCount(0));
    assert_eq!(err.to_string(), "invalid worker count 0 (need at least 1)");
}

#[test]
fn empty_dispatch_returns_empty() {
    let out: Vec<u8> = WorkerPool::scoped(2, |pool| pool.dispatch(Vec::<u8>::new(), |_, x| Ok(x)))
        .unwrap();
    assert!(out.is_empty());
}
