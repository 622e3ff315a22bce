//! Interval operations over segment lists.
//!
//! Every function here is pure: it borrows the input list and returns a new
//! one. List order is insertion order, not start order; only
//! [`fill_first_gap`] and [`export_ranges`] sort.

use cliptrim_core::{clamp, Result, Segment, TrimError};

/// Input list, or one full-span segment when the caller has none yet.
pub fn default_segments(segments: Option<&[Segment]>, duration: f64) -> Vec<Segment> {
    match segments {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => vec![Segment::full(duration)],
    }
}

/// Replace the segment at `index` with its two halves, split at the midpoint.
pub fn split(segments: &[Segment], index: usize) -> Result<Vec<Segment>> {
    let segment = *segments
        .get(index)
        .ok_or(TrimError::SegmentIndexOutOfRange {
            index,
            len: segments.len(),
        })?;
    let mid = segment.midpoint();

    let mut result = Vec::with_capacity(segments.len() + 1);
    result.extend_from_slice(&segments[..index]);
    result.push(Segment::new(segment.start, mid));
    result.push(Segment::new(mid, segment.end));
    result.extend_from_slice(&segments[index + 1..]);
    Ok(result)
}

/// Remove the segment at `index`, keeping the order of the rest.
///
/// The result may be empty; that is a valid "nothing selected" state.
pub fn delete(segments: &[Segment], index: usize) -> Result<Vec<Segment>> {
    if index >= segments.len() {
        return Err(TrimError::SegmentIndexOutOfRange {
            index,
            len: segments.len(),
        });
    }
    let mut result = segments.to_vec();
    result.remove(index);
    Ok(result)
}

/// Add one segment covering the first uncovered interval of `[0, max_time]`.
///
/// The result is sorted by start. When the list already covers the whole
/// range the sorted input is returned unchanged, so callers detect
/// "fully covered" by comparing lengths.
pub fn fill_first_gap(segments: &[Segment], max_time: f64) -> Vec<Segment> {
    if segments.is_empty() {
        return vec![Segment::full(max_time)];
    }

    let mut sorted = segments.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let first_start = sorted[0].start;
    if first_start > 0.0 {
        sorted.insert(0, Segment::new(0.0, first_start));
        return sorted;
    }

    // Furthest end seen so far; a long segment may contain later ones.
    let mut covered_end = sorted[0].end;
    let mut gap = None;
    for (i, segment) in sorted.iter().enumerate().skip(1) {
        if covered_end < segment.start {
            gap = Some((i, Segment::new(covered_end, segment.start)));
            break;
        }
        covered_end = covered_end.max(segment.end);
    }
    if let Some((index, segment)) = gap {
        sorted.insert(index, segment);
        return sorted;
    }

    if covered_end < max_time {
        sorted.push(Segment::new(covered_end, max_time));
    }
    sorted
}

/// Index pairs `(i, j)` with `i < j` whose segments overlap.
pub fn overlapping_pairs(segments: &[Segment]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in segments.iter().enumerate() {
        for (j, b) in segments.iter().enumerate().skip(i + 1) {
            if a.overlaps(*b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Check every segment satisfies `0 <= start < end <= duration`.
pub fn validate(segments: &[Segment], duration: f64) -> Result<()> {
    for segment in segments {
        segment.validate(duration)?;
    }
    Ok(())
}

/// Ordered, non-overlapping intervals for downstream consumers.
///
/// Bounds are clamped to `[0, duration]`, empty intervals are dropped and
/// overlapping or touching intervals are merged.
pub fn export_ranges(segments: &[Segment], duration: f64) -> Vec<Segment> {
    let mut clamped: Vec<Segment> = segments
        .iter()
        .map(|s| {
            Segment::new(
                clamp(s.start, 0.0, duration),
                clamp(s.end, 0.0, duration),
            )
        })
        .filter(|s| s.end > s.start)
        .collect();
    clamped.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Segment> = Vec::with_capacity(clamped.len());
    for segment in clamped {
        match merged.last_mut() {
            Some(last) if segment.start <= last.end => {
                last.end = last.end.max(segment.end);
            }
            _ => merged.push(segment),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segs(pairs: &[(f64, f64)]) -> Vec<Segment> {
        pairs.iter().copied().map(Segment::from).collect()
    }

    #[test]
    fn test_default_segments() {
        assert_eq!(default_segments(None, 12.0), segs(&[(0.0, 12.0)]));
        assert_eq!(default_segments(Some(&[]), 12.0), segs(&[(0.0, 12.0)]));
        let input = segs(&[(1.0, 2.0)]);
        assert_eq!(default_segments(Some(&input), 12.0), input);
    }

    #[test]
    fn test_split_middle_segment() {
        let input = segs(&[(0.0, 2.0), (4.0, 8.0), (9.0, 10.0)]);
        let result = split(&input, 1).unwrap();
        assert_eq!(
            result,
            segs(&[(0.0, 2.0), (4.0, 6.0), (6.0, 8.0), (9.0, 10.0)])
        );
    }

    #[test]
    fn test_split_out_of_range() {
        let input = segs(&[(0.0, 2.0)]);
        assert!(matches!(
            split(&input, 1),
            Err(TrimError::SegmentIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_delete_preserves_order() {
        let input = segs(&[(5.0, 6.0), (0.0, 1.0), (2.0, 3.0)]);
        let result = delete(&input, 1).unwrap();
        assert_eq!(result, segs(&[(5.0, 6.0), (2.0, 3.0)]));
    }

    #[test]
    fn test_delete_last_leaves_empty() {
        let result = delete(&segs(&[(0.0, 10.0)]), 0).unwrap();
        assert!(result.is_empty());
        assert!(delete(&result, 0).is_err());
    }

    #[test]
    fn test_fill_first_gap_empty() {
        assert_eq!(fill_first_gap(&[], 10.0), segs(&[(0.0, 10.0)]));
    }

    #[test]
    fn test_fill_first_gap_leading() {
        // Only the leading gap is filled; the trailing one waits for the next call.
        let once = fill_first_gap(&segs(&[(2.0, 5.0)]), 10.0);
        assert_eq!(once, segs(&[(0.0, 2.0), (2.0, 5.0)]));
        let twice = fill_first_gap(&once, 10.0);
        assert_eq!(twice, segs(&[(0.0, 2.0), (2.0, 5.0), (5.0, 10.0)]));
    }

    #[test]
    fn test_fill_first_gap_internal() {
        let result = fill_first_gap(&segs(&[(0.0, 3.0), (5.0, 8.0)]), 10.0);
        assert_eq!(result, segs(&[(0.0, 3.0), (3.0, 5.0), (5.0, 8.0)]));
    }

    #[test]
    fn test_fill_first_gap_unsorted_input() {
        let result = fill_first_gap(&segs(&[(5.0, 8.0), (0.0, 3.0)]), 10.0);
        assert_eq!(result, segs(&[(0.0, 3.0), (3.0, 5.0), (5.0, 8.0)]));
    }

    #[test]
    fn test_fill_first_gap_trailing() {
        let result = fill_first_gap(&segs(&[(0.0, 3.0), (3.0, 8.0)]), 10.0);
        assert_eq!(result, segs(&[(0.0, 3.0), (3.0, 8.0), (8.0, 10.0)]));
    }

    #[test]
    fn test_fill_first_gap_fully_covered() {
        assert_eq!(
            fill_first_gap(&segs(&[(0.0, 10.0)]), 10.0),
            segs(&[(0.0, 10.0)])
        );
    }

    #[test]
    fn test_fill_first_gap_sees_past_enclosed_segment() {
        let input = segs(&[(0.0, 10.0), (2.0, 3.0)]);
        assert_eq!(fill_first_gap(&input, 10.0), input);

        // The gap starts where the enclosing segment ends, not the enclosed one
        let result = fill_first_gap(&segs(&[(0.0, 6.0), (1.0, 2.0), (8.0, 9.0)]), 10.0);
        assert_eq!(result, segs(&[(0.0, 6.0), (1.0, 2.0), (6.0, 8.0), (8.0, 9.0)]));
    }

    #[test]
    fn test_overlapping_pairs() {
        let input = segs(&[(0.0, 4.0), (3.0, 6.0), (6.0, 8.0), (1.0, 2.0)]);
        assert_eq!(overlapping_pairs(&input), vec![(0, 1), (0, 3)]);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate(&segs(&[(0.0, 1.0), (2.0, 10.0)]), 10.0).is_ok());
        assert!(validate(&[], 10.0).is_ok());
        assert!(matches!(
            validate(&segs(&[(0.0, 1.0), (9.0, 11.0)]), 10.0),
            Err(TrimError::InvalidSegment { start, end }) if start == 9.0 && end == 11.0
        ));
        assert!(validate(&segs(&[(-1.0, 2.0)]), 10.0).is_err());
        assert!(validate(&segs(&[(4.0, 4.0)]), 10.0).is_err());
    }

    #[test]
    fn test_export_ranges_sorts_and_merges() {
        let input = segs(&[(6.0, 9.0), (0.0, 3.0), (2.0, 4.0), (4.0, 5.0), (8.0, 12.0)]);
        assert_eq!(
            export_ranges(&input, 10.0),
            segs(&[(0.0, 5.0), (6.0, 10.0)])
        );
    }

    #[test]
    fn test_export_ranges_drops_degenerate() {
        let input = segs(&[(3.0, 3.0), (11.0, 12.0)]);
        assert!(export_ranges(&input, 10.0).is_empty());
    }

    fn segment_list() -> impl Strategy<Value = Vec<Segment>> {
        prop::collection::vec((0f64..90.0, 1f64..10.0), 1..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(start, len)| Segment::new(start, start + len))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn split_adds_one_and_keeps_bounds(list in segment_list(), pick in 0usize..8) {
            let index = pick % list.len();
            let result = split(&list, index).unwrap();
            prop_assert_eq!(result.len(), list.len() + 1);
            prop_assert_eq!(result[index].start, list[index].start);
            prop_assert_eq!(result[index + 1].end, list[index].end);
            prop_assert_eq!(result[index].end, result[index + 1].start);
        }

        #[test]
        fn delete_removes_one_in_order(list in segment_list(), pick in 0usize..8) {
            let index = pick % list.len();
            let result = delete(&list, index).unwrap();
            prop_assert_eq!(result.len(), list.len() - 1);
            let expected: Vec<Segment> = list
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, s)| *s)
                .collect();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn fill_first_gap_adds_at_most_one(list in segment_list()) {
            let result = fill_first_gap(&list, 100.0);
            prop_assert!(result.len() == list.len() || result.len() == list.len() + 1);
        }

        #[test]
        fn fill_first_gap_unchanged_only_when_covered(list in segment_list()) {
            let unchanged = fill_first_gap(&list, 100.0).len() == list.len();
            let covered = export_ranges(&list, 100.0) == vec![Segment::new(0.0, 100.0)];
            prop_assert_eq!(unchanged, covered);
        }

        #[test]
        fn export_ranges_are_disjoint_and_sorted(list in segment_list()) {
            let ranges = export_ranges(&list, 100.0);
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
            }
            for r in &ranges {
                prop_assert!(r.start >= 0.0 && r.end <= 100.0 && r.start < r.end);
            }
        }
    }
}
