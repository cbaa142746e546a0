//! Error types for thumbgrab

use thiserror::Error;

/// Main error type for thumbgrab operations
#[derive(Debug, Error)]
pub enum ThumbError {
    #[error("Playlist error: {0}")]
    PlaylistFetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed for {filename}: {reason}")]
    Download { filename: String, reason: String },

    #[error("Generic error: {0}")]
    Generic(String),
}
