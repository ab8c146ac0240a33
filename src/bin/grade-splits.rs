//! grade-splits CLI - analyze a GPX track and print the JSON response
//!
//! Usage:
//!   grade-splits <file.gpx | https://.../track.gpx> [--pretty] [--summary] [-v]
//!
//! Prints `{"status": "success", "splits": [...], "trackpoints": [...]}` on
//! success, or `{"error": "..."}` with a non-zero exit status.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grade_splits::{
    analyze_track, error::TrackError, ingest::resolve_points, AnalysisResponse, TrackRequest,
    UploadedFile,
};
use log::{error, LevelFilter};

#[derive(Parser)]
#[command(name = "grade-splits")]
#[command(about = "Detect ascent/descent splits in a GPX track", long_about = None)]
struct Cli {
    /// GPX file path, or http(s) URL of a GPX file
    input: String,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print a distance/elevation summary of the track to stderr
    #[arg(short, long)]
    summary: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn build_request(input: &str) -> Result<TrackRequest, TrackError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        return Ok(TrackRequest::from_url(input));
    }

    let path = PathBuf::from(input);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let contents = fs::read(&path)?;
    Ok(TrackRequest::from_upload(UploadedFile::new(file_name, contents)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let response = match build_request(&cli.input).and_then(|request| resolve_points(&request)) {
        Ok(points) => {
            let analysis = analyze_track(&points);
            if cli.summary {
                let summary = analysis.summary();
                eprintln!(
                    "{} points, {:.2} km, +{:.0} m / -{:.0} m, {} splits",
                    summary.point_count,
                    summary.total_distance / 1000.0,
                    summary.total_ascent,
                    summary.total_descent,
                    analysis.splits.len()
                );
            }
            AnalysisResponse::success(&analysis)
        }
        Err(err) => {
            error!("[GradeSplits] {}: {}", cli.input, err);
            AnalysisResponse::from(&err)
        }
    };

    let json = if cli.pretty {
        response.to_json_pretty()
    } else {
        response.to_json()
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("[GradeSplits] Failed to serialize response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
