use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the poster-sync library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the media server
    #[error("server returned status {status} for {url}")]
    Api { status: u16, url: String },

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Failure establishing or using the media-server connection
    #[error("Connection error: {0}")]
    Connection(String),
}
