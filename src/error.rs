use std::path::PathBuf;

use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),
    #[error("Media Error: {0}")]
    Media(#[from] MediaError),
    #[error("Controller Error: {0}")]
    Controller(String),
    #[error("UI Error: {0}")]
    Ui(String),
}

// Outbound HTTP Error Type
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("Malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Media metadata Error Type
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("ffprobe was not found on PATH")]
    ProbeNotFound,
    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),
    #[error("No video stream in {0}")]
    NoVideoStream(PathBuf),
    #[error("Media file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse probe output: {0}")]
    Json(#[from] serde_json::Error),
}
