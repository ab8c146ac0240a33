//! Single-pass track analysis.
//!
//! The enricher and the split detector advance in lockstep over the track,
//! threaded through an explicit accumulator. The merge pass then runs on the
//! detector's output.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::enrich::Enricher;
use crate::geo_utils::{compute_bounds, Bounds};
use crate::splits::{merge_adjacent_splits, SplitDetector};
use crate::{EnrichedPoint, RawPoint, TrackAnalysis};

/// State carried from one point to the next.
#[derive(Debug, Default)]
struct TrackAccumulator {
    enricher: Enricher,
    detector: SplitDetector,
    trackpoints: Vec<EnrichedPoint>,
}

impl TrackAccumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            trackpoints: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    fn advance(mut self, point: &RawPoint) -> Self {
        let (enriched, step) = self.enricher.push(point);
        if let Some(step) = step {
            self.detector.step(&step);
        }
        self.trackpoints.push(enriched);
        self
    }

    fn finish(self) -> TrackAnalysis {
        let raw = self.detector.finish(self.enricher.cumulative_distance());
        let raw_count = raw.len();
        let splits = merge_adjacent_splits(raw);
        if raw_count != splits.len() {
            debug!(
                "[GradeSplits] Merged {} raw splits into {}",
                raw_count,
                splits.len()
            );
        }

        TrackAnalysis {
            trackpoints: self.trackpoints,
            splits,
        }
    }
}

/// Enrich every point of a track and detect its ascent/descent splits.
///
/// An empty track yields empty trackpoints and splits.
///
/// # Example
/// ```
/// use grade_splits::{analyze_track, RawPoint};
///
/// let analysis = analyze_track(&[]);
/// assert!(analysis.trackpoints.is_empty());
/// assert!(analysis.splits.is_empty());
///
/// let track = vec![
///     RawPoint::new(0.0, 0.0, Some(10.0)),
///     RawPoint::new(0.0, 0.0, Some(12.0)),
/// ];
/// let analysis = analyze_track(&track);
/// assert_eq!(analysis.trackpoints[1].grade, 0.0);
/// ```
pub fn analyze_track(points: &[RawPoint]) -> TrackAnalysis {
    let analysis = points
        .iter()
        .fold(
            TrackAccumulator::with_capacity(points.len()),
            TrackAccumulator::advance,
        )
        .finish();

    info!(
        "[GradeSplits] Analyzed {} points: {:.0}m, {} splits",
        analysis.trackpoints.len(),
        analysis.total_distance(),
        analysis.splits.len()
    );

    analysis
}

impl TrackAnalysis {
    /// Distance from the first to the last point, in meters (rounded to 2 decimals).
    pub fn total_distance(&self) -> f64 {
        self.trackpoints
            .last()
            .map_or(0.0, |p| p.distance_from_start)
    }

    /// Summary statistics for the analyzed track.
    pub fn summary(&self) -> TrackSummary {
        let mut total_ascent = 0.0;
        let mut total_descent = 0.0;
        for pair in self.trackpoints.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].elevation, pair[1].elevation) {
                let change = b - a;
                if change > 0.0 {
                    total_ascent += change;
                } else {
                    total_descent -= change;
                }
            }
        }

        let elevations = self.trackpoints.iter().filter_map(|p| p.elevation);
        let min_elevation = elevations.clone().reduce(f64::min);
        let max_elevation = elevations.reduce(f64::max);

        TrackSummary {
            point_count: self.trackpoints.len(),
            total_distance: self.total_distance(),
            total_ascent,
            total_descent,
            min_elevation,
            max_elevation,
            bounds: compute_bounds(self.trackpoints.iter().map(|p| (p.latitude, p.longitude))),
        }
    }
}

/// Headline numbers for a track, derived from its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub point_count: usize,
    /// Meters
    pub total_distance: f64,
    /// Sum of positive elevation changes between consecutive points, meters
    pub total_ascent: f64,
    /// Sum of negative elevation changes between consecutive points, as a positive number of meters
    pub total_descent: f64,
    pub min_elevation: Option<f64>,
    pub max_elevation: Option<f64>,
    pub bounds: Option<Bounds>,
}
