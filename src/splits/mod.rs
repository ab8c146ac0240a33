//! Ascent/descent split detection.
//!
//! Detection runs in two stages:
//! 1. [`SplitDetector`]: a single pass over the track steps that opens, relabels
//!    and closes splits against the elevation and distance thresholds
//! 2. [`merge_adjacent_splits`]: coalesces consecutive splits of the same type
//!
//! Use [`crate::analyze_track`] to get splits and enriched trackpoints in one
//! pass; [`detect_splits`] is the splits-only shortcut.

mod detector;
mod merge;

pub use detector::SplitDetector;
pub use merge::merge_adjacent_splits;

use crate::enrich::Enricher;
use crate::{RawPoint, Split};

/// Detect the final split list of a track.
///
/// # Example
/// ```
/// use grade_splits::{detect_splits, RawPoint};
///
/// // Flat track: no splits
/// let track: Vec<RawPoint> = (0..10)
///     .map(|i| RawPoint::new(46.0 + i as f64 * 0.001, 7.0, Some(500.0)))
///     .collect();
/// assert!(detect_splits(&track).is_empty());
/// ```
pub fn detect_splits(points: &[RawPoint]) -> Vec<Split> {
    let mut enricher = Enricher::new();
    let mut detector = SplitDetector::new();

    for point in points {
        if let (_, Some(step)) = enricher.push(point) {
            detector.step(&step);
        }
    }

    merge_adjacent_splits(detector.finish(enricher.cumulative_distance()))
}
