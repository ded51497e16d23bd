//! Update orchestrator - the end-to-end self-update flow.
//!
//! One invocation moves through two states:
//!
//! - **Idle**: decide whether a remote check is warranted (`force`, or the
//!   staleness window has passed), then persist the new `lastChecked`
//!   timestamp. The write always happens, before any remote call, and is
//!   never rolled back.
//! - **Checking**: list releases, select the first strictly newer one, ask the
//!   user, and download the matching asset on confirmation.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lyzer_common::{ConfigError, ConfigStore, LyzerConfig};

use crate::api::{ReleaseCandidate, ReleaseSource};
use crate::download::Downloader;
use crate::error::{UpdateError, UpdateResult};
use crate::selector::select_update;
use crate::staleness;
use crate::version::SemanticVersion;
use crate::{ASSET_NAME, CURRENT_VERSION};

/// Interactive side of the update flow.
pub trait UpdatePrompt: Send + Sync {
    /// Called right before the remote check. Automatic runs stay silent otherwise.
    fn checking(&self) {}

    /// Ask whether `candidate` should be downloaded.
    fn confirm(&self, candidate: &ReleaseCandidate) -> UpdateResult<bool>;
}

/// Whether an answer to the update prompt is a yes (`y` / `yes`, any case).
pub fn is_affirmative(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Update-related state for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateState {
    /// ISO 8601 timestamp of the last check, empty when never checked
    pub last_checked: String,
    /// Version of the running build
    pub current_release: SemanticVersion,
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Not forced and the staleness window has not passed; no remote call made
    NotDue,
    /// No release newer than the running build
    UpToDate { current: SemanticVersion },
    /// A newer release exists but the user said no
    Declined { tag: String },
    /// The new executable was written to `destination`
    Downloaded {
        tag: String,
        destination: PathBuf,
        bytes: u64,
    },
}

impl UpdateOutcome {
    /// Whether a remote check was performed.
    pub fn checked(&self) -> bool {
        !matches!(self, Self::NotDue)
    }

    /// Whether the caller should exit so the downloaded build can be used.
    pub fn restart_required(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

/// Drives the self-update flow.
pub struct UpdateOrchestrator {
    config: LyzerConfig,
    state: UpdateState,
    store: Arc<dyn ConfigStore>,
    source: Arc<dyn ReleaseSource>,
    downloader: Arc<dyn Downloader>,
    prompt: Arc<dyn UpdatePrompt>,
    asset_name: String,
    destination: Option<PathBuf>,
}

impl UpdateOrchestrator {
    /// Create an orchestrator, loading the persisted config once.
    ///
    /// Defaults to the compiled-in version and the platform asset name. The
    /// download destination is resolved against the home directory only when
    /// a download actually happens, unless overridden.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        source: Arc<dyn ReleaseSource>,
        downloader: Arc<dyn Downloader>,
        prompt: Arc<dyn UpdatePrompt>,
    ) -> UpdateResult<Self> {
        let config = store.load()?;
        let current_release = SemanticVersion::parse(CURRENT_VERSION)?;

        Ok(Self {
            state: UpdateState {
                last_checked: config.last_checked.clone(),
                current_release,
            },
            config,
            store,
            source,
            downloader,
            prompt,
            asset_name: ASSET_NAME.to_string(),
            destination: None,
        })
    }

    /// Override the version treated as currently running.
    pub fn with_current_release(mut self, version: SemanticVersion) -> Self {
        self.state.current_release = version;
        self
    }

    /// Override where the downloaded asset is written.
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Override which release asset is downloaded.
    pub fn with_asset_name(mut self, name: impl Into<String>) -> Self {
        self.asset_name = name.into();
        self
    }

    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    /// Where the asset will be written: the override, or the home directory.
    pub fn destination(&self) -> UpdateResult<PathBuf> {
        if let Some(destination) = &self.destination {
            return Ok(destination.clone());
        }
        let dirs = lyzer_common::get_app_dirs().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(dirs.download_destination(&self.asset_name))
    }

    /// Run the flow at the current time.
    pub async fn run(&mut self, force: bool) -> UpdateResult<UpdateOutcome> {
        self.run_at(force, Utc::now()).await
    }

    /// Run the flow as if the current time were `now`.
    pub async fn run_at(&mut self, force: bool, now: DateTime<Utc>) -> UpdateResult<UpdateOutcome> {
        let due = force || staleness::is_due(&self.state.last_checked, now);

        self.state.last_checked = staleness::format_timestamp(now);
        self.config.last_checked = self.state.last_checked.clone();
        self.store.save(&self.config)?;

        if !due {
            tracing::debug!("update check not due");
            return Ok(UpdateOutcome::NotDue);
        }

        self.prompt.checking();
        let releases = self.source.list_releases().await?;
        let current = self.state.current_release;

        let Some(candidate) = select_update(&releases, &current)? else {
            tracing::info!(%current, "no newer release");
            return Ok(UpdateOutcome::UpToDate { current });
        };

        if !self.prompt.confirm(candidate)? {
            tracing::info!(tag = %candidate.tag, "update declined");
            return Ok(UpdateOutcome::Declined {
                tag: candidate.tag.clone(),
            });
        }

        let asset =
            candidate
                .asset_named(&self.asset_name)
                .ok_or_else(|| UpdateError::NoMatchingAsset {
                    tag: candidate.tag.clone(),
                    asset: self.asset_name.clone(),
                })?;

        let destination = self.destination()?;
        let bytes = self.downloader.fetch(&asset.url, &destination).await?;

        Ok(UpdateOutcome::Downloaded {
            tag: candidate.tag.clone(),
            destination,
            bytes,
        })
    }
}
