use std::path::PathBuf;

/// Errors raised while talking to the game catalog.
///
/// None of these are fatal to the launcher; the resolver turns every one of
/// them into the filename-only fallback record.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Catalog request attempted without a session token")]
    NoSession,

    #[error("Downloaded file is empty: {}", .0.display())]
    EmptyDownload(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
