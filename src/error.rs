//! Error types for the keywatch store inspector.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Value for key '{key}' is not valid UTF-8")]
    InvalidValue { key: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Errors surfaced by the operation layer and the request boundary.
///
/// The `Display` text is what clients see in the `{"error": ...}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Key required")]
    KeyRequired,

    #[error("{0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
