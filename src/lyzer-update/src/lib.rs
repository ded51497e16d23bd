//! Lyzer Update - self-update system for the Lyzer CLI
//!
//! Provides:
//! - Semantic version parsing and comparison
//! - A one-day staleness window for unforced checks
//! - Release selection against the GitHub releases listing
//! - The update orchestrator that ties them together with a confirmation
//!   prompt and a download to a fixed local path
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lyzer_update::{GithubReleaseClient, HttpDownloader, UpdateOrchestrator};
//!
//! let mut orchestrator = UpdateOrchestrator::new(
//!     store,
//!     Arc::new(GithubReleaseClient::new()),
//!     Arc::new(HttpDownloader::new()),
//!     prompt,
//! )?;
//!
//! let outcome = orchestrator.run(true).await?;
//! if outcome.restart_required() {
//!     std::process::exit(0);
//! }
//! ```

mod api;
mod download;
mod error;
mod manager;
mod selector;
mod staleness;
mod version;

pub use api::{GithubReleaseClient, ReleaseAsset, ReleaseCandidate, ReleaseSource};
pub use download::{Downloader, HttpDownloader, format_bytes};
pub use error::{UpdateError, UpdateResult};
pub use manager::{UpdateOrchestrator, UpdateOutcome, UpdatePrompt, UpdateState, is_affirmative};
pub use selector::select_update;
pub use staleness::{STALENESS_WINDOW_DAYS, format_timestamp, is_due, parse_timestamp};
pub use version::{SemanticVersion, VersionComparison};

/// Current version of Lyzer CLI (set at compile time)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default release listing URL
pub const RELEASES_URL: &str = "https://api.github.com/repos/Evanlab02/Lyzer-ETL/releases";

/// Name of the distributable asset attached to each release
pub const ASSET_NAME: &str = if cfg!(target_os = "windows") {
    "lyzer.exe"
} else {
    "lyzer"
};
