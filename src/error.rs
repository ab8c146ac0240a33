//! Unified error handling for the grade-splits library.
//!
//! The analysis core cannot fail on well-formed input. Every error here comes
//! from the layers around it (GPX parsing, uploads, URL fetching) and is
//! reported to the caller before the core runs.

use std::fmt;

/// Unified error type for track ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// The document could not be parsed as GPX
    InvalidGpx { message: String },
    /// The URL could not be parsed as an absolute http(s) URL
    InvalidUrl { url: String },
    /// The URL does not point at a `.gpx` document
    UnsupportedUrl { url: String },
    /// Fetching the document failed
    DownloadFailed {
        message: String,
        status_code: Option<u16>,
    },
    /// The upload was flagged as failed by the transport
    UploadFailed,
    /// The uploaded file does not carry a `.gpx` extension
    InvalidFileType { file_name: String },
    /// Neither a URL nor an upload was supplied
    MissingInput,
    /// The operation needs a cargo feature that is not compiled in
    FeatureDisabled { feature: &'static str },
    /// Reading a local file failed
    Io { message: String },
}

impl TrackError {
    /// Short message suitable for the `error` field of a response envelope.
    pub fn user_message(&self) -> &'static str {
        match self {
            TrackError::InvalidGpx { .. } => "Invalid GPX file",
            TrackError::InvalidUrl { .. } => "Invalid URL provided",
            TrackError::UnsupportedUrl { .. } => "URL must point to a GPX file",
            TrackError::DownloadFailed { .. } => "Failed to download GPX file from URL",
            TrackError::UploadFailed => "File upload failed",
            TrackError::InvalidFileType { .. } => "Invalid file type. Please upload a GPX file",
            TrackError::MissingInput => "No file uploaded or URL provided",
            TrackError::FeatureDisabled { .. } => "URL fetching is not enabled",
            TrackError::Io { .. } => "Failed to read GPX file",
        }
    }
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InvalidGpx { message } => {
                write!(f, "Invalid GPX document: {}", message)
            }
            TrackError::InvalidUrl { url } => write!(f, "Invalid URL '{}'", url),
            TrackError::UnsupportedUrl { url } => {
                write!(f, "URL '{}' does not point to a .gpx file", url)
            }
            TrackError::DownloadFailed {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Download failed ({}): {}", code, message)
                } else {
                    write!(f, "Download failed: {}", message)
                }
            }
            TrackError::UploadFailed => write!(f, "Upload failed"),
            TrackError::InvalidFileType { file_name } => {
                write!(f, "File '{}' is not a .gpx file", file_name)
            }
            TrackError::MissingInput => write!(f, "No upload or URL in request"),
            TrackError::FeatureDisabled { feature } => {
                write!(f, "Feature '{}' is not enabled", feature)
            }
            TrackError::Io { message } => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for TrackError {}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "gpx")]
impl From<gpx::errors::GpxError> for TrackError {
    fn from(err: gpx::errors::GpxError) -> Self {
        TrackError::InvalidGpx {
            message: err.to_string(),
        }
    }
}

/// Result type alias for grade-splits operations.
pub type Result<T> = std::result::Result<T, TrackError>;
