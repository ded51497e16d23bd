//! Common utilities shared across Lyzer CLI crates.

pub mod config;
pub mod dirs;
pub mod http_client;

pub use config::{ConfigError, ConfigResult, ConfigStore, FileConfigStore, LyzerConfig};
pub use dirs::{AppDirs, get_app_dirs};
pub use http_client::{
    CONNECT_TIMEOUT, DEFAULT_TIMEOUT, DOWNLOAD_TIMEOUT, USER_AGENT, create_client_with_timeout,
    create_default_client, create_download_client,
};
