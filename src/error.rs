//! Error types for loading emails and talking to the detection service

use thiserror::Error;

/// Errors raised around the parser: file loading, configuration and the
/// detection service. Parsing itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// The uploaded file had no content after trimming
    #[error("File is empty")]
    EmptyFile,

    /// Failed to read the email file
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure talking to the detection service
    #[error("Request to detection service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The detection service answered with a non-success status
    #[error("Detection service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The detection service answered with a body we could not decode
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required input was not provided
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    Config { key: String, message: String },
}

/// Result type for phishguard operations
pub type Result<T> = std::result::Result<T, Error>;
