//! Error types for the stream catalog.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the stream catalog.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Table store URL not configured. Set SUPABASE_URL environment variable")]
    StoreUrlMissing,

    #[error("Table store key not configured. Set SUPABASE_ANON_KEY environment variable")]
    StoreKeyMissing,

    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Table store errors
    #[error("Table store request failed ({status}): {message}")]
    Store { status: u16, message: String },

    // TMDB errors
    #[error("TMDB request failed ({status}): {message}")]
    Tmdb { status: u16, message: String },

    // Catalog errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    // Player errors
    #[error("Fullscreen request rejected: {0}")]
    Fullscreen(String),

    // Local state errors
    #[error("Invalid state file: {0}")]
    InvalidStateFile(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error means the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
