//! Error types for hackdash
//!
//! Centralized error handling using thiserror.

use reqwest::StatusCode;
use thiserror::Error;

/// All error types that can occur in hackdash
#[derive(Debug, Error)]
pub enum DashError {
    /// Request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}")]
    Status { status: StatusCode },

    /// Backend reported a semantic error in an otherwise well-formed body
    #[error("Backend error: {0}")]
    Backend(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashError {
    /// True for errors raised by the backend rather than the network or the payload
    pub fn is_backend_reported(&self) -> bool {
        matches!(self, DashError::Status { .. } | DashError::Backend(_))
    }
}

/// Result type alias for hackdash operations
pub type Result<T> = std::result::Result<T, DashError>;
