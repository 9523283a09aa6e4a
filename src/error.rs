//! Error types for the isilon library.

use thiserror::Error;

use crate::api::error::ApiError;

/// Main error type for isilon operations.
#[derive(Error, Debug)]
pub enum IsilonError {
    /// The cluster answered with a non-2xx status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Request did not complete within the configured timeout.
    #[error("HTTP request timed out")]
    Timeout,

    /// A required argument was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration is incomplete or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A client-side lookup found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A successful reply was missing the body the operation needs.
    #[error("Invalid response from server")]
    InvalidResponse,
}

impl IsilonError {
    /// True when the cluster reported the resource as missing, or a local
    /// lookup came up empty.
    pub fn is_not_found(&self) -> bool {
        match self {
            IsilonError::Api(e) => e.is_not_found(),
            IsilonError::NotFound(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for isilon operations.
pub type Result<T> = std::result::Result<T, IsilonError>;
