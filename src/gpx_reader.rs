//! GPX ingestion: turn a GPX document into an ordered list of raw points.
//!
//! Every track point of every segment of every track is collected in
//! document order. Waypoints and routes are ignored. A `<trkpt>` without an
//! `<ele>` child yields a point with no elevation.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::RawPoint;

/// Parse a GPX document from any reader.
///
/// # Example
/// ```
/// let doc = r#"<?xml version="1.0"?>
/// <gpx version="1.1" creator="doc"><trk><trkseg>
///   <trkpt lat="46.0" lon="7.0"><ele>500</ele></trkpt>
///   <trkpt lat="46.001" lon="7.0"/>
/// </trkseg></trk></gpx>"#;
///
/// let points = grade_splits::parse_gpx(doc.as_bytes()).unwrap();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].elevation, Some(500.0));
/// assert_eq!(points[1].elevation, None);
/// ```
pub fn parse_gpx<R: Read>(reader: R) -> Result<Vec<RawPoint>> {
    let document = gpx::read(reader)?;

    let points: Vec<RawPoint> = document
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .map(|waypoint| {
            let point = waypoint.point();
            RawPoint::new(point.y(), point.x(), waypoint.elevation)
        })
        .collect();

    if document.tracks.len() > 1 {
        warn!(
            "[GpxReader] Document has {} tracks, concatenating their points",
            document.tracks.len()
        );
    }
    debug!(
        "[GpxReader] Parsed {} track points from {} tracks",
        points.len(),
        document.tracks.len()
    );

    Ok(points)
}

/// Read and parse a GPX file from disk.
pub fn read_gpx_file(path: impl AsRef<Path>) -> Result<Vec<RawPoint>> {
    let file = File::open(path.as_ref())?;
    parse_gpx(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackError;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="10.0" lon="10.0"><ele>1</ele></wpt>
  <trk>
    <name>Morning Ride</name>
    <trkseg>
      <trkpt lat="46.0000" lon="7.0000"><ele>500.5</ele></trkpt>
      <trkpt lat="46.0010" lon="7.0005"><ele>0</ele></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="46.0020" lon="7.0010"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_parse_segments_in_order() {
        let points = parse_gpx(TWO_SEGMENTS.as_bytes()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], RawPoint::new(46.0, 7.0, Some(500.5)));
        assert_eq!(points[1].latitude, 46.001);
        assert_eq!(points[1].longitude, 7.0005);
        assert_eq!(points[1].elevation, Some(0.0));
        assert_eq!(points[2].elevation, None);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_gpx("<gpx><trk>".as_bytes()).unwrap_err();
        assert!(matches!(err, TrackError::InvalidGpx { .. }));
        assert_eq!(err.user_message(), "Invalid GPX file");
    }

    #[test]
    fn test_missing_file() {
        let err = read_gpx_file("/nonexistent/track.gpx").unwrap_err();
        assert!(matches!(err, TrackError::Io { .. }));
    }
}
