//! Release listing client for the GitHub releases API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::RELEASES_URL;
use crate::error::{UpdateError, UpdateResult};
use crate::version::SemanticVersion;

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub url: String,
}

/// A remote release: its tag plus the assets it ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub tag: String,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseCandidate {
    pub fn new(tag: impl Into<String>, assets: Vec<ReleaseAsset>) -> Self {
        Self {
            tag: tag.into(),
            assets,
        }
    }

    /// Parse the tag into a version.
    pub fn version(&self) -> UpdateResult<SemanticVersion> {
        SemanticVersion::parse(&self.tag)
    }

    /// Find the asset with exactly this file name.
    pub fn asset_named(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// Source of remote releases, newest first.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// List all published releases in the order the remote returns them.
    async fn list_releases(&self) -> UpdateResult<Vec<ReleaseCandidate>>;
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<GithubAsset>,
}

#[derive(Debug, Deserialize)]
struct GithubAsset {
    name: String,
    browser_download_url: String,
}

impl From<GithubRelease> for ReleaseCandidate {
    fn from(release: GithubRelease) -> Self {
        Self {
            tag: release.tag_name,
            assets: release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    url: asset.browser_download_url,
                })
                .collect(),
        }
    }
}

/// Client for the GitHub releases endpoint of the Lyzer repository.
#[derive(Clone)]
pub struct GithubReleaseClient {
    client: Client,
    url: String,
}

impl GithubReleaseClient {
    /// Create a client for the default releases URL.
    pub fn new() -> Self {
        Self::with_url(RELEASES_URL)
    }

    /// Create a client for a custom releases URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = lyzer_common::create_default_client().unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to a default client");
            Client::new()
        });
        Self::with_client(client, url)
    }

    /// Create a client around an already configured HTTP client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Default for GithubReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseSource for GithubReleaseClient {
    async fn list_releases(&self) -> UpdateResult<Vec<ReleaseCandidate>> {
        tracing::info!(url = %self.url, "fetching release list");

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| UpdateError::from_request(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::ReleaseFetch {
                status: status.as_u16(),
            });
        }

        let releases: Vec<GithubRelease> = response
            .json()
            .await
            .map_err(|e| UpdateError::from_request(&self.url, e))?;

        tracing::debug!(count = releases.len(), "release list received");
        Ok(releases.into_iter().map(ReleaseCandidate::from).collect())
    }
}
