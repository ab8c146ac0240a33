//! HTTP client for fetching GPX tracks by URL.
//!
//! The URL is validated (absolute http(s), path ending in `.gpx`) before any
//! request is made. The document is downloaded into memory with a size cap
//! and parsed directly from the response body.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::{Client, Url};

use crate::error::{Result, TrackError};
use crate::gpx_reader::parse_gpx;
use crate::RawPoint;

/// Configuration for track fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    /// Default: 30
    pub timeout_secs: u64,

    /// Largest accepted response body in bytes.
    /// Default: 32 MiB
    pub max_body_bytes: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_body_bytes: 32 * 1024 * 1024,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Check that `raw` is an absolute http(s) URL whose path names a `.gpx` file.
///
/// Surrounding whitespace is ignored. The extension check is case-insensitive
/// and looks at the URL path only, so query strings do not interfere.
pub fn validate_track_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| TrackError::InvalidUrl {
        url: trimmed.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(TrackError::InvalidUrl {
            url: trimmed.to_string(),
        });
    }

    let file_name = url.path().rsplit('/').next().unwrap_or_default();
    let is_gpx = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("gpx"));
    if !is_gpx {
        return Err(TrackError::UnsupportedUrl {
            url: trimmed.to_string(),
        });
    }

    Ok(url)
}

fn download_error(err: reqwest::Error) -> TrackError {
    TrackError::DownloadFailed {
        message: err.to_string(),
        status_code: err.status().map(|s| s.as_u16()),
    }
}

/// Downloads GPX documents over HTTP.
pub struct TrackFetcher {
    client: Client,
    config: FetchConfig,
}

impl TrackFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TrackError::DownloadFailed {
                message: format!("Failed to create HTTP client: {}", e),
                status_code: None,
            })?;

        Ok(Self { client, config })
    }

    /// Download the raw GPX document at `url`.
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        let url = validate_track_url(url)?;
        let start = Instant::now();
        info!("[TrackFetcher] Fetching {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(download_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("[TrackFetcher] {} returned {}", url, status);
            return Err(TrackError::DownloadFailed {
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                status_code: Some(status.as_u16()),
            });
        }

        let max = self.config.max_body_bytes;
        if let Some(length) = response.content_length() {
            if length > max {
                return Err(TrackError::DownloadFailed {
                    message: format!("document is {} bytes, limit is {}", length, max),
                    status_code: Some(status.as_u16()),
                });
            }
        }

        // Read chunk by chunk so an unannounced oversized body is cut off early
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(download_error)? {
            if (body.len() + chunk.len()) as u64 > max {
                warn!("[TrackFetcher] {} exceeded {} bytes, aborting", url, max);
                return Err(TrackError::DownloadFailed {
                    message: format!("document exceeds limit of {} bytes", max),
                    status_code: Some(status.as_u16()),
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            "[TrackFetcher] Downloaded {} bytes in {} ms",
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// Download and parse the GPX track at `url`.
    pub async fn fetch_track(&self, url: &str) -> Result<Vec<RawPoint>> {
        let document = self.fetch_document(url).await?;
        parse_gpx(document.as_slice())
    }
}

/// Synchronous wrapper: runs [`TrackFetcher::fetch_track`] on a private
/// tokio runtime owned by a dedicated thread.
///
/// Safe to call from within an async context.
pub fn fetch_track_sync(url: &str, config: FetchConfig) -> Result<Vec<RawPoint>> {
    // Validate before paying for a thread and runtime
    validate_track_url(url)?;

    let url = url.to_string();
    let worker = std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TrackError::DownloadFailed {
                message: format!("Failed to create runtime: {}", e),
                status_code: None,
            })?;

        let fetcher = TrackFetcher::new(config)?;
        runtime.block_on(fetcher.fetch_track(&url))
    });

    worker.join().map_err(|_| TrackError::DownloadFailed {
        message: "fetch thread panicked".to_string(),
        status_code: None,
    })?
}
