//! Centralized HTTP client factory for all Lyzer services.
//!
//! Provides factory functions to create HTTP clients with consistent configuration:
//! - `create_default_client()` - Standard 30s timeout for API calls
//! - `create_download_client()` - 5min timeout for release downloads
//! - `create_client_with_timeout(duration)` - Custom timeout
//!
//! Every outbound call made by the CLI goes through one of these, so no request
//! can block the calling task without a bound.

use reqwest::Client;
use std::time::Duration;

/// User-Agent string for all HTTP requests (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("lyzer-cli/", env!("CARGO_PKG_VERSION"));

/// Default timeout for standard API requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extended timeout for binary downloads (5 minutes)
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for establishing a TCP connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates an HTTP client with default configuration (30s timeout).
pub fn create_default_client() -> Result<Client, String> {
    create_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Creates an HTTP client for downloading release assets (5min timeout).
pub fn create_download_client() -> Result<Client, String> {
    create_client_with_timeout(DOWNLOAD_TIMEOUT)
}

/// Creates an HTTP client with a custom timeout.
///
/// All clients include:
/// - User-Agent: `lyzer-cli/{version}`
/// - Connect timeout of 10s
/// - Specified overall timeout
/// - Read timeout to prevent hangs on Content-Length mismatches
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client, String> {
    let read_timeout = timeout.min(Duration::from_secs(60));

    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .read_timeout(read_timeout)
        .tcp_nodelay(true)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {e}"))
}
