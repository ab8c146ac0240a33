//! JSON response envelope for callers of the analysis.
//!
//! A successful analysis is rendered as
//! `{"status": "success", "splits": [...], "trackpoints": [...]}` with every
//! split field rounded to 2 decimals; a failure before analysis is rendered
//! as `{"error": "<message>"}`.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::{round2, EnrichedPoint, Split, SplitType, TrackAnalysis};

pub const STATUS_SUCCESS: &str = "success";

/// Split as it appears in the response, all fields rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    #[serde(rename = "type")]
    pub split_type: SplitType,
    pub start_distance: f64,
    pub end_distance: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    pub total_elevation_change: f64,
    pub total_distance: f64,
    pub average_grade: f64,
}

impl From<&Split> for SplitRecord {
    fn from(split: &Split) -> Self {
        Self {
            split_type: split.split_type,
            start_distance: round2(split.start_distance),
            end_distance: round2(split.end_distance),
            start_elevation: round2(split.start_elevation),
            end_elevation: round2(split.end_elevation),
            total_elevation_change: round2(split.total_elevation_change),
            total_distance: round2(split.total_distance),
            average_grade: split.average_grade,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub status: String,
    pub splits: Vec<SplitRecord>,
    pub trackpoints: Vec<EnrichedPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response to an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success(SuccessBody),
    Error(ErrorBody),
}

impl AnalysisResponse {
    pub fn success(analysis: &TrackAnalysis) -> Self {
        AnalysisResponse::Success(SuccessBody {
            status: STATUS_SUCCESS.to_string(),
            splits: analysis.splits.iter().map(SplitRecord::from).collect(),
            trackpoints: analysis.trackpoints.clone(),
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        AnalysisResponse::Error(ErrorBody {
            error: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResponse::Success(_))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to an indented JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&TrackError> for AnalysisResponse {
    fn from(err: &TrackError) -> Self {
        AnalysisResponse::error(err.user_message())
    }
}

impl From<crate::Result<TrackAnalysis>> for AnalysisResponse {
    fn from(result: crate::Result<TrackAnalysis>) -> Self {
        match result {
            Ok(analysis) => AnalysisResponse::success(&analysis),
            Err(err) => AnalysisResponse::from(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_split() -> Split {
        Split {
            split_type: SplitType::Descent,
            start_distance: 512.3456,
            end_distance: 1024.6789,
            start_elevation: 1203.456,
            end_elevation: 1150.004,
            total_elevation_change: -53.452,
            total_distance: 512.3333,
            average_grade: -10.43,
        }
    }

    #[test]
    fn test_split_record_rounds_fields() {
        let record = SplitRecord::from(&sample_split());
        assert_eq!(record.start_distance, 512.35);
        assert_eq!(record.end_distance, 1024.68);
        assert_eq!(record.start_elevation, 1203.46);
        assert_eq!(record.end_elevation, 1150.0);
        assert_eq!(record.total_elevation_change, -53.45);
        assert_eq!(record.total_distance, 512.33);
        assert_eq!(record.average_grade, -10.43);
    }

    #[test]
    fn test_success_shape() {
        let analysis = TrackAnalysis {
            trackpoints: vec![EnrichedPoint {
                latitude: 46.0,
                longitude: 7.0,
                elevation: None,
                distance_from_start: 0.0,
                grade: 0.0,
            }],
            splits: vec![sample_split()],
        };
        let value: Value =
            serde_json::from_str(&AnalysisResponse::success(&analysis).to_json().unwrap()).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["splits"][0]["type"], "descent");
        assert_eq!(value["splits"][0]["total_distance"], json!(512.33));
        assert_eq!(value["trackpoints"][0]["elevation"], Value::Null);
        assert_eq!(value["trackpoints"][0]["distance_from_start"], json!(0.0));
    }

    #[test]
    fn test_error_shape() {
        let response = AnalysisResponse::from(&TrackError::MissingInput);
        assert!(!response.is_success());
        let value: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"error": "No file uploaded or URL provided"}));
    }

    #[test]
    fn test_empty_analysis_is_success() {
        let response = AnalysisResponse::from(Ok(TrackAnalysis::default()));
        let value: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"status": "success", "splits": [], "trackpoints": []})
        );
    }
}
