//! Application directories for the Lyzer CLI.
//!
//! - Config lives in `~/.lyzer` on every platform.
//! - Downloaded release binaries land directly in the user's home directory.
//!
//! `LYZER_HOME` overrides the config directory.

use std::path::PathBuf;

/// Directory name under the user's home directory
pub const HOME_DIR_NAME: &str = ".lyzer";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config directory
pub const HOME_ENV_VAR: &str = "LYZER_HOME";

/// Application directories structure
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// Configuration directory (~/.lyzer)
    pub config_dir: PathBuf,
    /// The user's home directory, used as the download destination
    pub home_dir: PathBuf,
}

impl AppDirs {
    /// Get application directories, respecting `LYZER_HOME`.
    ///
    /// Relative values of `LYZER_HOME` are resolved against the current
    /// directory so the config never ends up somewhere unexpected.
    pub fn new() -> Option<Self> {
        let home_dir = dirs::home_dir()?;

        let config_dir = match std::env::var(HOME_ENV_VAR) {
            Ok(home) if !home.trim().is_empty() => {
                let home = PathBuf::from(home);
                if home.is_relative() {
                    std::env::current_dir()
                        .map(|cwd| cwd.join(&home))
                        .unwrap_or_else(|_| home_dir.join(HOME_DIR_NAME))
                } else {
                    home
                }
            }
            _ => home_dir.join(HOME_DIR_NAME),
        };

        Some(Self {
            config_dir,
            home_dir,
        })
    }

    /// Build directories rooted at explicit paths.
    pub fn with_paths(config_dir: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            home_dir: home_dir.into(),
        }
    }

    /// Path of the JSON config file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Fixed destination for a downloaded release asset
    pub fn download_destination(&self, asset_name: &str) -> PathBuf {
        self.home_dir.join(asset_name)
    }
}

/// Get application directories (convenience function)
pub fn get_app_dirs() -> Option<AppDirs> {
    AppDirs::new()
}
