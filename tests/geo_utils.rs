//! Tests for geo_utils module

use grade_splits::geo_utils::*;
use grade_splits::{RawPoint, EARTH_RADIUS_M};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    assert_eq!(haversine_distance(51.5074, -0.1278, 51.5074, -0.1278), 0.0);
}

#[test]
fn test_haversine_distance_symmetric() {
    let pairs = [
        ((51.5074, -0.1278), (48.8566, 2.3522)),
        ((-33.8688, 151.2093), (-37.8136, 144.9631)),
        ((0.0, 179.9), (0.0, -179.9)),
    ];
    for ((lat1, lon1), (lat2, lon2)) in pairs {
        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        assert!(approx_eq(ab, ba, 1e-6));
    }
}

#[test]
fn test_haversine_distance_equator_regression() {
    // 0.01 degree of latitude at the equator
    let dist = haversine_distance(0.0, 0.0, 0.01, 0.0);
    assert!(approx_eq(dist, 1113.0, 2.0));
    assert!(approx_eq(dist, EARTH_RADIUS_M * 0.01_f64.to_radians(), 1e-6));
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let dist = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
    assert!(approx_eq(dist, 343_560.0, 5000.0));
}

#[test]
fn test_haversine_distance_antimeridian() {
    // 0.2 degree of longitude across the date line
    let dist = haversine_distance(0.0, 179.9, 0.0, -179.9);
    assert!(approx_eq(dist, EARTH_RADIUS_M * 0.2_f64.to_radians(), 1e-3));
}

#[test]
fn test_point_distance_matches_coordinates() {
    let a = RawPoint::new(46.0, 7.0, Some(100.0));
    let b = RawPoint::new(46.01, 7.01, None);
    assert_eq!(
        point_distance(&a, &b),
        haversine_distance(46.0, 7.0, 46.01, 7.01)
    );
}

#[test]
fn test_polyline_length() {
    let track: Vec<RawPoint> = (0..5)
        .map(|i| RawPoint::new(i as f64 * 0.01, 0.0, None))
        .collect();
    let length = polyline_length(&track);
    assert!(approx_eq(length, 4.0 * EARTH_RADIUS_M * 0.01_f64.to_radians(), 1e-6));
    assert_eq!(polyline_length(&[]), 0.0);
}

#[test]
fn test_compute_bounds_skips_invalid() {
    let bounds = compute_bounds(vec![(46.0, 7.0), (95.0, 7.0), (46.2, 6.8)]).unwrap();
    assert_eq!(bounds.max_lat, 46.2);
    assert_eq!(bounds.min_lng, 6.8);
    let (lat, lng) = bounds.center();
    assert!(approx_eq(lat, 46.1, 1e-9));
    assert!(approx_eq(lng, 6.9, 1e-9));
}
