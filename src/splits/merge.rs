//! Final merge pass over detected splits.

use crate::Split;

/// Coalesce adjacent splits that share a type.
///
/// The detector can emit two consecutive splits of the same direction when a
/// short run was relabelled in place; this pass folds each such split into
/// its predecessor so the result strictly alternates between ascent and
/// descent. Lists of zero or one split are returned unchanged, and running
/// the pass on its own output is a no-op.
pub fn merge_adjacent_splits(splits: Vec<Split>) -> Vec<Split> {
    if splits.len() < 2 {
        return splits;
    }

    let mut merged: Vec<Split> = Vec::with_capacity(splits.len());
    for split in splits {
        match merged.last_mut() {
            Some(previous) if previous.split_type == split.split_type => previous.absorb(&split),
            _ => merged.push(split),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SplitType;

    fn split(
        split_type: SplitType,
        start: f64,
        end: f64,
        start_elevation: f64,
        change: f64,
    ) -> Split {
        Split {
            split_type,
            start_distance: start,
            end_distance: end,
            start_elevation,
            end_elevation: start_elevation + change,
            total_elevation_change: change,
            total_distance: end - start,
            average_grade: Split::grade_for(change, end - start),
        }
    }

    #[test]
    fn test_empty_and_single_pass_through() {
        assert!(merge_adjacent_splits(Vec::new()).is_empty());
        let one = vec![split(SplitType::Ascent, 0.0, 100.0, 10.0, 5.0)];
        assert_eq!(merge_adjacent_splits(one.clone()), one);
    }

    #[test]
    fn test_adjacent_ascents_merge() {
        let splits = vec![
            split(SplitType::Ascent, 0.0, 450.0, 100.0, 45.0),
            split(SplitType::Ascent, 450.0, 550.0, 145.0, 10.0),
        ];
        let merged = merge_adjacent_splits(splits);
        assert_eq!(merged.len(), 1);
        let m = merged[0];
        assert_eq!(m.split_type, SplitType::Ascent);
        assert_eq!(m.start_distance, 0.0);
        assert_eq!(m.end_distance, 550.0);
        assert_eq!(m.start_elevation, 100.0);
        assert_eq!(m.end_elevation, 155.0);
        assert_eq!(m.total_distance, 550.0);
        assert_eq!(m.total_elevation_change, 55.0);
        assert_eq!(m.average_grade, 10.0);
    }

    #[test]
    fn test_runs_of_three_collapse() {
        let splits = vec![
            split(SplitType::Descent, 0.0, 500.0, 300.0, -50.0),
            split(SplitType::Ascent, 500.0, 1000.0, 250.0, 20.0),
            split(SplitType::Ascent, 1000.0, 1400.0, 270.0, 20.0),
            split(SplitType::Ascent, 1400.0, 1800.0, 290.0, 20.0),
            split(SplitType::Descent, 1800.0, 2300.0, 310.0, -10.0),
        ];
        let merged = merge_adjacent_splits(splits);
        let types: Vec<SplitType> = merged.iter().map(|s| s.split_type).collect();
        assert_eq!(
            types,
            vec![SplitType::Descent, SplitType::Ascent, SplitType::Descent]
        );
        assert_eq!(merged[1].total_distance, 1300.0);
        assert_eq!(merged[1].end_distance, 1800.0);
        assert_eq!(merged[1].average_grade, 4.62);
    }

    #[test]
    fn test_idempotent() {
        let splits = vec![
            split(SplitType::Ascent, 0.0, 450.0, 100.0, 45.0),
            split(SplitType::Ascent, 450.0, 900.0, 145.0, 3.0),
            split(SplitType::Descent, 900.0, 1500.0, 148.0, -40.0),
        ];
        let once = merge_adjacent_splits(splits);
        let twice = merge_adjacent_splits(once.clone());
        assert_eq!(once, twice);
    }
}
