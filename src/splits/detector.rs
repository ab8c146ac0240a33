//! Sequential split-boundary detection.
//!
//! The detector is advanced once per [`Step`] and keeps at most one open
//! split. A direction change of at least [`ELEVATION_THRESHOLD_M`] closes the
//! open split if it already covers [`SPLIT_DISTANCE_THRESHOLD_M`]; a shorter
//! split is instead relabelled with the new direction and keeps running, with
//! its elevation change reset. Smaller wiggles are absorbed into the open
//! split.

use log::debug;

use crate::enrich::Step;
use crate::{Split, SplitType, ELEVATION_THRESHOLD_M, SPLIT_DISTANCE_THRESHOLD_M};

/// A split that has started but not yet been closed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenSplit {
    split_type: SplitType,
    start_distance: f64,
    start_elevation: f64,
    total_elevation_change: f64,
    total_distance: f64,
}

impl OpenSplit {
    fn start(split_type: SplitType, start_distance: f64, start_elevation: f64) -> Self {
        Self {
            split_type,
            start_distance,
            start_elevation,
            total_elevation_change: 0.0,
            total_distance: 0.0,
        }
    }

    fn is_long_enough(&self) -> bool {
        self.total_distance >= SPLIT_DISTANCE_THRESHOLD_M
    }

    fn close(self, end_distance: f64, end_elevation: f64) -> Split {
        Split {
            split_type: self.split_type,
            start_distance: self.start_distance,
            end_distance,
            start_elevation: self.start_elevation,
            end_elevation,
            total_elevation_change: self.total_elevation_change,
            total_distance: self.total_distance,
            average_grade: Split::grade_for(self.total_elevation_change, self.total_distance),
        }
    }
}

/// Stateful split detector.
///
/// Feed it every step of the track with [`SplitDetector::step`], then call
/// [`SplitDetector::finish`] to settle the trailing split. The returned list
/// may still contain adjacent splits of the same type; run it through
/// [`merge_adjacent_splits`](super::merge_adjacent_splits) to finalize.
#[derive(Debug, Clone, Default)]
pub struct SplitDetector {
    current: Option<OpenSplit>,
    splits: Vec<Split>,
    last_elevation: Option<f64>,
}

impl SplitDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits closed so far.
    pub fn closed_splits(&self) -> &[Split] {
        &self.splits
    }

    /// Whether a split is currently open.
    pub fn has_open_split(&self) -> bool {
        self.current.is_some()
    }

    /// Advance the state machine by one step.
    ///
    /// Steps with a missing elevation on either end leave the state untouched.
    pub fn step(&mut self, step: &Step) {
        if step.elevation.is_some() {
            self.last_elevation = step.elevation;
        }

        let (Some(previous_elevation), Some(change)) =
            (step.previous_elevation, step.elevation_change())
        else {
            return;
        };

        let significant = change.abs() >= ELEVATION_THRESHOLD_M;
        let step_type = SplitType::from_elevation_change(change);

        let mut open = match self.current.take() {
            None if significant => {
                OpenSplit::start(step_type, step.start_distance, previous_elevation)
            }
            None => return,
            Some(open) if open.split_type != step_type && significant => {
                if open.is_long_enough() {
                    let closed = open.close(step.start_distance, previous_elevation);
                    debug!(
                        "[SplitDetector] Closed {} split {:.1}m -> {:.1}m ({:.2}%)",
                        closed.split_type,
                        closed.start_distance,
                        closed.end_distance,
                        closed.average_grade
                    );
                    self.splits.push(closed);
                    OpenSplit::start(step_type, step.start_distance, previous_elevation)
                } else {
                    // Too short to stand alone: carry the run over into the
                    // new direction, dropping its elevation change so far
                    OpenSplit {
                        split_type: step_type,
                        total_elevation_change: 0.0,
                        ..open
                    }
                }
            }
            Some(open) => open,
        };

        open.total_distance += step.distance;
        open.total_elevation_change += change;
        self.current = Some(open);
    }

    /// Settle the trailing split and return the raw split list.
    ///
    /// `track_distance` is the cumulative distance at the last point of the
    /// track. A trailing split that is long enough is closed there; a short
    /// one is folded into the last closed split, or dropped if there is none.
    pub fn finish(mut self, track_distance: f64) -> Vec<Split> {
        let Some(open) = self.current.take() else {
            return self.splits;
        };
        if open.total_distance <= 0.0 {
            return self.splits;
        }

        // An open split implies at least one step with known elevations
        let end_elevation = self.last_elevation.unwrap_or(open.start_elevation);

        if open.is_long_enough() {
            self.splits.push(open.close(track_distance, end_elevation));
        } else if let Some(last) = self.splits.last_mut() {
            debug!(
                "[SplitDetector] Folding trailing {:.1}m {} fragment into previous {} split",
                open.total_distance, open.split_type, last.split_type
            );
            let fragment = open.close(track_distance, end_elevation);
            last.absorb(&fragment);
        } else {
            debug!(
                "[SplitDetector] Dropping trailing {:.1}m fragment, no split qualifies",
                open.total_distance
            );
        }

        self.splits
    }
}
