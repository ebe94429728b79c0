//! Error types
//!
//! `ApiError` is what every public operation returns. `StorageError` covers the
//! local date cache and is wrapped by `ApiError::StorageError`.

use thiserror::Error;

/// Errors raised by the date cache.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error for fetching, rendering and configuration.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The content API answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, url: String },

    /// The response parsed but was neither a listing nor a file object.
    #[error("Unexpected data format received from API: {0}")]
    UnexpectedShape(String),

    /// Enrichment finished for a row that is no longer in the table.
    #[error("Row not found for {0}")]
    RowNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// Status code when the failure came from the remote API.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return ApiError::UnexpectedShape(err.to_string());
        }
        ApiError::Network(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
