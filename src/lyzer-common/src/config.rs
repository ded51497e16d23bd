//! Persisted CLI configuration.
//!
//! The whole document is read and written at once; there is no partial
//! update and no locking beyond "write the whole file each time".

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine home directory")]
    HomeDirNotFound,
}

/// The structured contents of `config.json`.
///
/// Key names match the file layout used since the first release so existing
/// config files keep loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyzerConfig {
    /// MongoDB connection string
    pub mongo_uri: String,

    /// ISO 8601 timestamp of the last update check, empty when never checked
    #[serde(default)]
    pub last_checked: String,

    /// ISO 8601 timestamp of the last config write
    #[serde(default)]
    pub last_updated: String,

    /// Override for the release listing endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub releases_url: Option<String>,

    /// Override for the schedule API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_url: Option<String>,
}

impl LyzerConfig {
    /// Fresh config for a connection string that has just been verified.
    pub fn new(mongo_uri: impl Into<String>) -> Self {
        Self {
            mongo_uri: mongo_uri.into(),
            ..Default::default()
        }
    }
}

/// Whole-document configuration persistence.
pub trait ConfigStore: Send + Sync {
    /// Read the full config document.
    fn load(&self) -> ConfigResult<LyzerConfig>;

    /// Replace the full config document.
    fn save(&self, config: &LyzerConfig) -> ConfigResult<()>;
}

/// Config store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Store reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location (`~/.lyzer/config.json`).
    pub fn default_location() -> ConfigResult<Self> {
        let dirs = crate::dirs::get_app_dirs().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::new(dirs.config_file()))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the config file has been created yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ConfigResult<LyzerConfig> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                ConfigError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, config: &LyzerConfig) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut stamped = config.clone();
        stamped.last_updated = Utc::now().to_rfc3339();

        let content = serde_json::to_string_pretty(&stamped).map_err(|source| {
            ConfigError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), "config file updated");
        Ok(())
    }
}
