use proptest::prelude::*;

use reduction_bench::engine::partition::{covers_exactly, fixed_ranges};
use reduction_bench::WorkRange;

fn bounds(ranges: &[WorkRange]) -> Vec<(usize, usize)> {
    ranges.iter().map(|r| (r.start, r.end)).collect()
}

#[test]
fn even_split_has_equal_ranges() {
    assert_eq!(bounds(&fixed_ranges(8, 4)), vec![(0, 2), (2, 4), (4, 6), (6, 8)]);
}

#[test]
fn remainder_is_folded_into_last_range() {
    // 10 / 4 = 2 per range, remainder 2 goes to the last one.
    assert_eq!(bounds(&fixed_ranges(10, 4)), vec![(0, 2), (2, 4), (4, 6), (6, 10)]);
}

#[test]
fn more_parts_than_elements_leaves_leading_ranges_empty() {
    let ranges = fixed_ranges(3, 5);
    assert_eq!(ranges.len(), 5);
    assert!(ranges[..4].iter().all(WorkRange::is_empty));
    assert_eq!(ranges[4], WorkRange::new(0, 3));
    assert!(covers_exactly(&ranges, 3));
}

#[test]
fn empty_domain_yields_empty_ranges() {
    let ranges = fixed_ranges(0, 3);
    assert_eq!(ranges.len(), 3);
    assert!(ranges.iter().all(WorkRange::is_empty));
    assert!(covers_exactly(&ranges, 0));
}

#[test]
#[should_panic(expected = "zero ranges")]
fn zero_parts_panics() {
    let _ = fixed_ranges(10, 0);
}

#[test]
fn coverage_check_rejects_gaps_and_overlaps() {
    let gap = [WorkRange::new(0, 2), WorkRange::new(3, 5)];
    let overlap = [WorkRange::new(0, 3), WorkRange::new(2, 5)];
    let short = [WorkRange::new(0, 2), WorkRange::new(2, 4)];

    assert!(!covers_exactly(&gap, 5));
    assert!(!covers_exactly(&overlap, 5));
    assert!(!covers_exactly(&short, 5));
}

#[test]
fn midpoint_split_halves_range() {
    let (left, right) = WorkRange::new(3, 10).split();
    assert_eq!(left, WorkRange::new(3, 6));
    assert_eq!(right, WorkRange::new(6, 10));
    assert_eq!(left.len() + right.len(), 7);
}

proptest! {
    #[test]
    fn ranges_cover_domain_exactly_once(
        (len, parts) in (1usize..50_000).prop_flat_map(|n| (Just(n), 1usize..=n.min(64)))
    ) {
        let ranges = fixed_ranges(len, parts);

        prop_assert_eq!(ranges.len(), parts);
        prop_assert!(covers_exactly(&ranges, len));
        prop_assert_eq!(ranges.last().map(|r| r.end), Some(len));

        let mut hits = vec![0u8; len];
        for r in &ranges {
            for i in r.start..r.end {
                hits[i] += 1;
            }
        }
        prop_assert!(hits.iter().all(|&h| h == 1));

        let step = len / parts;
        for r in &ranges[..parts - 1] {
            prop_assert_eq!(r.len(), step);
        }
    }
}
