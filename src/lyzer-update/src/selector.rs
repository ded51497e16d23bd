//! Picks the release to update to.

use crate::api::ReleaseCandidate;
use crate::error::UpdateResult;
use crate::version::SemanticVersion;

/// Return the first release, in remote order, that is strictly newer than `current`.
///
/// The remote ordering (newest first) is authoritative, so the scan stops at
/// the first match rather than looking for a maximum. A malformed tag met
/// before a match fails the whole selection.
pub fn select_update<'a>(
    releases: &'a [ReleaseCandidate],
    current: &SemanticVersion,
) -> UpdateResult<Option<&'a ReleaseCandidate>> {
    for release in releases {
        let version = release.version()?;
        if version.is_newer_than(current) {
            tracing::debug!(tag = %release.tag, %current, "newer release found");
            return Ok(Some(release));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;

    fn releases(tags: &[&str]) -> Vec<ReleaseCandidate> {
        tags.iter()
            .map(|tag| ReleaseCandidate::new(*tag, Vec::new()))
            .collect()
    }

    fn select(tags: &[&str], current: &str) -> Option<String> {
        let releases = releases(tags);
        let current = SemanticVersion::parse(current).unwrap();
        select_update(&releases, &current)
            .unwrap()
            .map(|r| r.tag.clone())
    }

    #[test]
    fn test_newer_patch_is_selected() {
        assert_eq!(select(&["v1.0.0", "v1.0.1"], "1.0.0").as_deref(), Some("v1.0.1"));
        assert_eq!(select(&["v1.0.0", "v1.0.1"], "1.0.1"), None);
    }

    #[test]
    fn test_newer_minor_is_selected() {
        assert_eq!(select(&["v1.0.0", "v1.1.0"], "1.0.0").as_deref(), Some("v1.1.0"));
        assert_eq!(select(&["v1.0.0", "v1.1.0"], "1.1.0"), None);
    }

    #[test]
    fn test_newer_major_is_selected() {
        assert_eq!(select(&["v1.0.0", "v2.0.0"], "1.0.0").as_deref(), Some("v2.0.0"));
        assert_eq!(select(&["v1.0.0", "v2.0.0"], "2.0.0"), None);
    }

    #[test]
    fn test_first_match_wins_in_remote_order() {
        assert_eq!(
            select(&["v1.2.0", "v1.5.0", "v1.0.0"], "1.0.0").as_deref(),
            Some("v1.2.0")
        );
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert_eq!(select(&[], "1.0.0"), None);
    }

    #[test]
    fn test_malformed_tag_propagates() {
        let releases = releases(&["nightly", "v9.0.0"]);
        let current = SemanticVersion::new(1, 0, 0);
        assert!(matches!(
            select_update(&releases, &current),
            Err(UpdateError::MalformedVersion { .. })
        ));
    }

    #[test]
    fn test_scan_stops_before_later_malformed_tag() {
        assert_eq!(
            select(&["v2.0.0", "not-a-version"], "1.0.0").as_deref(),
            Some("v2.0.0")
        );
    }
}
