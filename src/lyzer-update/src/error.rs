//! Error types for lyzer-update.

use thiserror::Error;

/// Result type for update operations.
pub type UpdateResult<T> = std::result::Result<T, UpdateError>;

/// Errors that can occur during update operations.
#[derive(Debug, Error)]
pub enum UpdateError {
    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to connect to release server: {message}")]
    ConnectionFailed { message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Release listing failed with HTTP status {status}")]
    ReleaseFetch { status: u16 },

    // Version errors
    #[error("Malformed version: {version:?} (expected MAJOR.MINOR.PATCH)")]
    MalformedVersion { version: String },

    #[error("Malformed timestamp: {timestamp:?}")]
    MalformedTimestamp { timestamp: String },

    // Download errors
    #[error("Release {tag} has no asset named {asset}")]
    NoMatchingAsset { tag: String, asset: String },

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    // File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error(transparent)]
    Config(#[from] lyzer_common::ConfigError),
}

impl UpdateError {
    /// Build the error for a failed outbound request, keeping timeouts distinct.
    pub(crate) fn from_request(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            Self::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }

    /// HTTP status carried by a transport failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ReleaseFetch { status } => Some(*status),
            _ => None,
        }
    }
}
