//! Error handling module for the deepfake client

use thiserror::Error;

/// Errors raised while configuring and wiring the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint is not an absolute http(s) URL
    #[error("Invalid service endpoint: {endpoint} ({reason})")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Unknown service contract name
    #[error("Unknown service contract: {name}. Expected 'analyze' or 'detect-deepfake'")]
    UnknownContract { name: String },

    /// Unknown log format name
    #[error("Unknown log format: {name}. Expected 'pretty', 'compact' or 'json'")]
    UnknownLogFormat { name: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for client setup operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;
