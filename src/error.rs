//! Error types for the movie catalog.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the movie catalog.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY or tmdb.api_key in config.toml")]
    TmdbApiKeyMissing,

    #[error("Catalog root not configured. Pass ROOT or set catalog.root in config.toml")]
    CatalogRootMissing,

    #[error("Invalid config file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // Record store errors
    #[error("No record file in {0}")]
    RecordNotFound(String),

    #[error("Corrupt record file {path}: {reason}")]
    RecordCorrupt { path: String, reason: String },

    // Provider errors
    #[error("Provider request failed with status {status}: {what}")]
    ProviderStatus { status: u16, what: String },

    // Filter errors
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is a missing or unreadable record file.
    ///
    /// Both cases send the synchronizer back to the folder name.
    pub fn is_record_unavailable(&self) -> bool {
        matches!(self, Error::RecordNotFound(_) | Error::RecordCorrupt { .. })
    }
}
