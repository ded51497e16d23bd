//! Error types for lyzer-storage.

use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection string could not be parsed.
    #[error("Invalid connection string: {0}")]
    InvalidUri(String),

    /// The server did not answer a ping.
    #[error("Could not reach MongoDB: {0}")]
    Unreachable(String),

    /// Any other driver failure.
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
