//! Request handling around the analysis core.
//!
//! A request carries either a URL or an uploaded file. Everything that can go
//! wrong (missing input, failed upload, wrong extension, download failure,
//! unparseable GPX) is reported as an error response before the core runs.

use std::path::Path;

use log::{info, warn};

use crate::error::{Result, TrackError};
use crate::gpx_reader::{parse_gpx, read_gpx_file};
use crate::response::AnalysisResponse;
use crate::{analyze_track, RawPoint, TrackAnalysis};

/// A file received from an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-supplied file name, used for the extension check
    pub file_name: String,
    pub contents: Vec<u8>,
    /// False when the transport reported the upload as failed
    pub upload_ok: bool,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
            upload_ok: true,
        }
    }

    /// An upload the transport flagged as failed.
    pub fn failed(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: Vec::new(),
            upload_ok: false,
        }
    }
}

/// An analysis request: a URL, an upload, or both (the URL wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackRequest {
    pub url: Option<String>,
    pub upload: Option<UploadedFile>,
}

impl TrackRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            upload: None,
        }
    }

    pub fn from_upload(upload: UploadedFile) -> Self {
        Self {
            url: None,
            upload: Some(upload),
        }
    }
}

/// Check that a file name carries a `.gpx` extension (case-insensitive).
pub fn validate_gpx_file_name(file_name: &str) -> Result<()> {
    let is_gpx = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"));

    if is_gpx {
        Ok(())
    } else {
        Err(TrackError::InvalidFileType {
            file_name: file_name.to_string(),
        })
    }
}

/// Validate an upload and parse its contents.
pub fn read_upload(upload: &UploadedFile) -> Result<Vec<RawPoint>> {
    if !upload.upload_ok {
        return Err(TrackError::UploadFailed);
    }
    validate_gpx_file_name(&upload.file_name)?;
    parse_gpx(upload.contents.as_slice())
}

/// Validate a local path and analyze the GPX file it names.
pub fn analyze_gpx_file(path: impl AsRef<Path>) -> Result<TrackAnalysis> {
    let path = path.as_ref();
    validate_gpx_file_name(&path.to_string_lossy())?;
    let points = read_gpx_file(path)?;
    Ok(analyze_track(&points))
}

#[cfg(feature = "http")]
fn fetch_points(url: &str) -> Result<Vec<RawPoint>> {
    crate::http::fetch_track_sync(url, crate::http::FetchConfig::default())
}

#[cfg(not(feature = "http"))]
fn fetch_points(_url: &str) -> Result<Vec<RawPoint>> {
    Err(TrackError::FeatureDisabled { feature: "http" })
}

/// Resolve a request to the raw points to analyze.
///
/// A non-blank URL takes precedence over an upload.
pub fn resolve_points(request: &TrackRequest) -> Result<Vec<RawPoint>> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    match (url, &request.upload) {
        (Some(url), _) => fetch_points(url),
        (None, Some(upload)) => read_upload(upload),
        (None, None) => Err(TrackError::MissingInput),
    }
}

/// Handle a request end to end, producing the response envelope.
///
/// Blocking when the request carries a URL; call from a blocking context.
pub fn handle_request(request: &TrackRequest) -> AnalysisResponse {
    match resolve_points(request) {
        Ok(points) => {
            info!("[GradeSplits] Analyzing {} points", points.len());
            AnalysisResponse::success(&analyze_track(&points))
        }
        Err(err) => {
            warn!("[GradeSplits] Request rejected: {}", err);
            AnalysisResponse::from(&err)
        }
    }
}
