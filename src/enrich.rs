//! Trackpoint enrichment: cumulative distance and per-point grade.
//!
//! The [`Enricher`] walks the track once and, for every point with a
//! predecessor, yields a [`Step`]. The same step values feed the split
//! detector, so distance and elevation change are computed only once per
//! point.

use crate::geo_utils::point_distance;
use crate::{round2, EnrichedPoint, RawPoint};

/// Movement between two consecutive track points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Cumulative distance at the previous point, in meters
    pub start_distance: f64,
    /// Distance between the two points, in meters
    pub distance: f64,
    pub previous_elevation: Option<f64>,
    pub elevation: Option<f64>,
}

impl Step {
    /// Build the step from `previous` to `current`, given the cumulative
    /// distance already covered at `previous`.
    pub fn between(previous: &RawPoint, current: &RawPoint, start_distance: f64) -> Self {
        Self {
            start_distance,
            distance: point_distance(previous, current),
            previous_elevation: previous.elevation,
            elevation: current.elevation,
        }
    }

    /// Cumulative distance at the current point.
    #[inline]
    pub fn end_distance(&self) -> f64 {
        self.start_distance + self.distance
    }

    /// Elevation change over the step, if both elevations are known.
    pub fn elevation_change(&self) -> Option<f64> {
        Some(self.elevation? - self.previous_elevation?)
    }

    /// Grade over the step in percent, rounded to 2 decimals.
    ///
    /// Zero when an elevation is missing or the points coincide.
    pub fn grade(&self) -> f64 {
        match self.elevation_change() {
            Some(change) if self.distance > 0.0 => round2(change / self.distance * 100.0),
            _ => 0.0,
        }
    }
}

/// Running state of the enrichment scan.
#[derive(Debug, Clone, Default)]
pub struct Enricher {
    cumulative_distance: f64,
    previous: Option<RawPoint>,
}

impl Enricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unrounded distance covered so far, in meters.
    pub fn cumulative_distance(&self) -> f64 {
        self.cumulative_distance
    }

    /// Enrich the next point. Returns the step from the previous point,
    /// or `None` for the first point of the track.
    pub fn push(&mut self, point: &RawPoint) -> (EnrichedPoint, Option<Step>) {
        let step = self
            .previous
            .map(|previous| Step::between(&previous, point, self.cumulative_distance));

        if let Some(step) = &step {
            self.cumulative_distance = step.end_distance();
        }
        self.previous = Some(*point);

        let enriched = EnrichedPoint {
            latitude: point.latitude,
            longitude: point.longitude,
            elevation: point.elevation,
            distance_from_start: round2(self.cumulative_distance),
            grade: step.map_or(0.0, |s| s.grade()),
        };

        (enriched, step)
    }
}

/// Enrich every point of a track with cumulative distance and grade.
///
/// Produces exactly one [`EnrichedPoint`] per input point, in order.
///
/// # Example
/// ```
/// use grade_splits::{enrich_trackpoints, RawPoint};
///
/// let track = vec![
///     RawPoint::new(0.0, 0.0, Some(100.0)),
///     RawPoint::new(0.001, 0.0, Some(105.0)),
/// ];
/// let enriched = enrich_trackpoints(&track);
/// assert_eq!(enriched[0].grade, 0.0);
/// assert!(enriched[1].grade > 4.0);
/// ```
pub fn enrich_trackpoints(points: &[RawPoint]) -> Vec<EnrichedPoint> {
    let mut enricher = Enricher::new();
    points.iter().map(|p| enricher.push(p).0).collect()
}
