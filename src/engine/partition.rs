//! Fixed partitioning of an index domain into contiguous work ranges.
//!
//! Both the fixed-pool reducer and the matrix-vector reducer split their index
//! space (array indices or matrix rows) the same way:
//!
//! * exactly `parts` ranges are produced,
//! * every range except the last has `len / parts` elements,
//! * the remainder `len % parts` is folded into the **last** range, so the last
//!   range always ends at `len`.
//!
//! This is a slightly uneven-load policy (the last worker can get up to
//! `parts - 1` extra elements) but it is simple and trivially correct: ranges
//! are contiguous, ordered, non-overlapping, and cover `[0, len)` exactly once.
//!
//! When `parts > len` the leading ranges are empty and the last range holds
//! everything.

use crate::engine::types::WorkRange;

/// Splits `[0, len)` into exactly `parts` contiguous ranges.
///
/// ## Panics
/// Panics if `parts == 0`. Reducers validate their worker count before
/// partitioning.
///
/// ## Example
/// ```
/// use reduction_bench::engine::partition::fixed_ranges;
///
/// let ranges = fixed_ranges(10, 3);
/// let bounds: Vec<_> = ranges.iter().map(|r| (r.start, r.end)).collect();
/// assert_eq!(bounds, vec![(0, 3), (3, 6), (6, 10)]);
/// ```

pub fn fixed_ranges(len: usize, parts: usize) -> Vec<WorkRange> {
    assert!(parts > 0, "cannot partition into zero ranges");

    let step = len / parts;
    (0..parts)
        .map(|i| {
            let start = i * step;
            let end = if i == parts - 1 { len } else { (i + 1) * step };
            WorkRange::new(start, end)
        })
        .collect()
}

/// Checks that `ranges` cover `[0, len)` exactly once, in order, with no gap
/// or overlap.
///
/// Used by tests and by debug assertions inside the reducers.

pub fn covers_exactly(ranges: &[WorkRange], len: usize) -> bool {
    let mut cursor = 0;
    for range in ranges {
        if range.start != cursor || range.end < range.start {
            return false;
        }
        cursor = range.end;
    }
    cursor == len
}
