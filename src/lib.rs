//! # Grade Splits
//!
//! GPS track enrichment and ascent/descent split detection.
//!
//! This library provides:
//! - Per-point enrichment with cumulative distance and instantaneous grade
//! - Detection of sustained ascent/descent "splits" with a minimum-distance filter
//! - GPX ingestion, URL fetching and a JSON response envelope around the core
//!
//! ## Features
//!
//! - **`gpx`** - GPX document parsing (enabled by default)
//! - **`http`** - Fetch GPX tracks by URL
//! - **`cli`** - Build the `grade-splits` command-line tool
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use grade_splits::{analyze_track, RawPoint};
//!
//! let points = vec![
//!     RawPoint::new(46.0000, 7.0000, Some(1200.0)),
//!     RawPoint::new(46.0010, 7.0000, Some(1215.0)),
//!     RawPoint::new(46.0020, 7.0000, None),
//! ];
//!
//! let analysis = analyze_track(&points);
//! assert_eq!(analysis.trackpoints.len(), 3);
//! println!("{} splits", analysis.splits.len());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TrackError};

// Geographic utilities (distance, bounds)
pub mod geo_utils;
pub use geo_utils::{haversine_distance, point_distance};

// Trackpoint enrichment (cumulative distance, grade)
pub mod enrich;
pub use enrich::enrich_trackpoints;

// Split detection and merging
pub mod splits;
pub use splits::{detect_splits, merge_adjacent_splits, SplitDetector};

// Single-pass pipeline
pub mod pipeline;
pub use pipeline::{analyze_track, TrackSummary};

// JSON response envelope
pub mod response;
pub use response::AnalysisResponse;

// GPX parsing
#[cfg(feature = "gpx")]
pub mod gpx_reader;
#[cfg(feature = "gpx")]
pub use gpx_reader::{parse_gpx, read_gpx_file};

// Upload / URL request handling
#[cfg(feature = "gpx")]
pub mod ingest;
#[cfg(feature = "gpx")]
pub use ingest::{analyze_gpx_file, handle_request, TrackRequest, UploadedFile};

// HTTP module for track fetching
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub use http::{FetchConfig, TrackFetcher};

// ============================================================================
// Thresholds
// ============================================================================

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Minimum elevation change between two points that can open a split or
/// flip its direction, in meters.
pub const ELEVATION_THRESHOLD_M: f64 = 1.0;

/// Minimum distance a split must cover to stand on its own, in meters.
pub const SPLIT_DISTANCE_THRESHOLD_M: f64 = 400.0;

/// Round to two decimal places, half away from zero.
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Core Types
// ============================================================================

/// A recorded track point as delivered by the ingestion layer.
///
/// A point without an explicit elevation carries `None`, which is distinct
/// from an elevation of 0 m.
///
/// # Example
/// ```
/// use grade_splits::RawPoint;
/// let point = RawPoint::new(45.8326, 6.8652, Some(4808.0)); // Mont Blanc
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl RawPoint {
    /// Create a new raw point.
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A track point enriched with cumulative distance and grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    /// Distance from the first point in meters, rounded to 2 decimals
    pub distance_from_start: f64,
    /// Grade from the previous point in percent, rounded to 2 decimals.
    /// 0 when either elevation is missing or the step has zero length.
    pub grade: f64,
}

/// Direction of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Ascent,
    Descent,
}

impl SplitType {
    /// Direction implied by an elevation change. Zero counts as descent.
    pub fn from_elevation_change(elevation_change: f64) -> Self {
        if elevation_change > 0.0 {
            SplitType::Ascent
        } else {
            SplitType::Descent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Ascent => "ascent",
            SplitType::Descent => "descent",
        }
    }
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous stretch of sustained ascent or descent.
///
/// Distances and elevations are in meters and kept at full precision;
/// `average_grade` is rounded to 2 decimals whenever it is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    #[serde(rename = "type")]
    pub split_type: SplitType,
    pub start_distance: f64,
    pub end_distance: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    pub total_elevation_change: f64,
    pub total_distance: f64,
    /// Percent, rounded to 2 decimals
    pub average_grade: f64,
}

impl Split {
    /// Average grade in percent for the given totals, rounded to 2 decimals.
    ///
    /// A zero-length split has a grade of 0.
    pub fn grade_for(total_elevation_change: f64, total_distance: f64) -> f64 {
        if total_distance > 0.0 {
            round2(total_elevation_change / total_distance * 100.0)
        } else {
            0.0
        }
    }

    /// Fold `next` into this split: extend the end, add the totals and
    /// recompute the average grade. The type of `self` is kept.
    pub fn absorb(&mut self, next: &Split) {
        self.extend_to(next.end_distance, next.end_elevation);
        self.total_distance += next.total_distance;
        self.total_elevation_change += next.total_elevation_change;
        self.average_grade = Split::grade_for(self.total_elevation_change, self.total_distance);
    }

    pub(crate) fn extend_to(&mut self, end_distance: f64, end_elevation: f64) {
        self.end_distance = end_distance;
        self.end_elevation = end_elevation;
    }
}

/// Output of the pipeline: one enriched point per input point, plus the
/// final split list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAnalysis {
    pub trackpoints: Vec<EnrichedPoint>,
    pub splits: Vec<Split>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn split(split_type: SplitType, start: f64, end: f64, change: f64) -> Split {
        Split {
            split_type,
            start_distance: start,
            end_distance: end,
            start_elevation: 100.0,
            end_elevation: 100.0 + change,
            total_elevation_change: change,
            total_distance: end - start,
            average_grade: Split::grade_for(change, end - start),
        }
    }

    #[test]
    fn test_raw_point_validation() {
        assert!(RawPoint::new(51.5074, -0.1278, None).is_valid());
        assert!(!RawPoint::new(91.0, 0.0, Some(10.0)).is_valid());
        assert!(!RawPoint::new(0.0, 181.0, None).is_valid());
        assert!(!RawPoint::new(f64::NAN, 0.0, None).is_valid());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_split_type_from_change() {
        assert_eq!(SplitType::from_elevation_change(2.0), SplitType::Ascent);
        assert_eq!(SplitType::from_elevation_change(-2.0), SplitType::Descent);
        assert_eq!(SplitType::from_elevation_change(0.0), SplitType::Descent);
    }

    #[test]
    fn test_split_type_serializes_lowercase() {
        let json = serde_json::to_string(&SplitType::Ascent).unwrap();
        assert_eq!(json, "\"ascent\"");
        assert_eq!(SplitType::Descent.to_string(), "descent");
    }

    #[test]
    fn test_grade_for_zero_distance() {
        assert_eq!(Split::grade_for(10.0, 0.0), 0.0);
        assert_eq!(Split::grade_for(50.0, 500.0), 10.0);
    }

    #[test]
    fn test_absorb_recomputes_grade() {
        let mut a = split(SplitType::Ascent, 0.0, 450.0, 45.0);
        let b = split(SplitType::Ascent, 450.0, 550.0, 5.0);
        a.absorb(&b);
        assert_eq!(a.end_distance, 550.0);
        assert_eq!(a.total_distance, 550.0);
        assert_eq!(a.total_elevation_change, 50.0);
        assert_eq!(a.average_grade, 9.09);
        assert_eq!(a.end_elevation, 105.0);
    }
}
