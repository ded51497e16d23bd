//! Semantic version parsing and comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{UpdateError, UpdateResult};

/// A `MAJOR.MINOR.PATCH` version. Pre-release and build metadata are not supported.
///
/// Ordering is lexicographic over (major, minor, patch), which the derived
/// `Ord` gives us through field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Result of comparing one version against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComparison {
    /// Left side is newer than right side
    Newer,
    /// Both sides are the same version
    Equal,
    /// Left side is older than right side
    Older,
}

impl From<Ordering> for VersionComparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Newer,
            Ordering::Equal => Self::Equal,
            Ordering::Less => Self::Older,
        }
    }
}

impl SemanticVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `[v]MAJOR.MINOR.PATCH`.
    ///
    /// Exactly three dot-separated components are required and each must be
    /// a plain non-negative integer.
    pub fn parse(tag: &str) -> UpdateResult<Self> {
        let malformed = || UpdateError::MalformedVersion {
            version: tag.to_string(),
        };

        let trimmed = tag.trim();
        let version = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let mut parts = version.split('.');
        let mut next = || -> UpdateResult<u64> {
            let part = parts.next().ok_or_else(malformed)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_| malformed())
        };

        let major = next()?;
        let minor = next()?;
        let patch = next()?;

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(major, minor, patch))
    }

    /// Compare `self` against `other`.
    pub fn compare(&self, other: &SemanticVersion) -> VersionComparison {
        self.cmp(other).into()
    }

    /// Whether `self` is strictly newer than `other`.
    pub fn is_newer_than(&self, other: &SemanticVersion) -> bool {
        self.compare(other) == VersionComparison::Newer
    }
}

impl FromStr for SemanticVersion {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
