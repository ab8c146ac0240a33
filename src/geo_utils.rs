//! Geographic utilities: great-circle distance, track length and bounds.

use geo::{BoundingRect, Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::{RawPoint, EARTH_RADIUS_M};

/// Great-circle distance between two coordinates in meters (haversine).
///
/// Inputs are in degrees. Identical points return 0.
///
/// # Example
/// ```
/// use grade_splits::haversine_distance;
/// let d = haversine_distance(0.0, 0.0, 0.01, 0.0);
/// assert!((d - 1111.95).abs() < 0.1);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards against a > 1 from rounding on near-antipodal points
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance between two track points in meters.
#[inline]
pub fn point_distance(a: &RawPoint, b: &RawPoint) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Total length of a track in meters (sum of consecutive distances).
pub fn polyline_length(points: &[RawPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| point_distance(&w[0], &w[1]))
        .sum()
}

/// Bounding box of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Center of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Compute the bounding box of the valid points of a track.
///
/// Returns `None` when the track has no valid points.
pub fn compute_bounds<I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let coords: Vec<Coord> = points
        .into_iter()
        .filter(|(lat, lng)| RawPoint::new(*lat, *lng, None).is_valid())
        .map(|(lat, lng)| Coord { x: lng, y: lat })
        .collect();

    let rect = LineString::new(coords).bounding_rect()?;
    Some(Bounds {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lng: rect.min().x,
        max_lng: rect.max().x,
    })
}
