use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sheet dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A CSV file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed before a response was received.
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// The server answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be produced.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
