//! Two-part (major.minor) versions and release-string parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::VersionError;

/// A `major.minor` version, ordered lexicographically by (major, minor).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Parse a strict `major.minor` string. A leading `v` is tolerated.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(VersionError::Empty);
        }
        if body.contains(['-', '+']) {
            return Err(VersionError::MajorAndMinorOnly {
                input: input.to_string(),
            });
        }
        let parts: Vec<&str> = body.split('.').collect();
        if parts.len() != 2 {
            return Err(VersionError::MajorAndMinorOnly {
                input: input.to_string(),
            });
        }
        Ok(Self {
            major: parse_component(input, parts[0])?,
            minor: parse_component(input, parts[1])?,
        })
    }

    /// The zero version (0.0) means "compatibility version not set".
    pub fn is_unset(&self) -> bool {
        self.major == 0 && self.minor == 0
    }

    /// Same major, `n` minors earlier. Saturates at minor 0.
    pub fn subtract_minor(&self, n: u64) -> Self {
        Self {
            major: self.major,
            minor: self.minor.saturating_sub(n),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&semver::Version> for Version {
    fn from(v: &semver::Version) -> Self {
        Self::new(v.major, v.minor)
    }
}

/// Parse a release string such as `v1.20.0-alpha.0.62+a5d22854a2ac21`.
///
/// Two-part strings (`1.29`) are accepted and get patch 0.
pub fn parse_release(input: &str) -> Result<semver::Version, VersionError> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if body.is_empty() {
        return Err(VersionError::Empty);
    }
    if let Ok(short) = Version::parse(body) {
        return Ok(semver::Version::new(short.major, short.minor, 0));
    }
    semver::Version::parse(body).map_err(|e| VersionError::InvalidFormat {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn parse_component(input: &str, part: &str) -> Result<u64, VersionError> {
    part.parse::<u64>().map_err(|e| VersionError::InvalidFormat {
        input: input.to_string(),
        reason: format!("component {:?}: {}", part, e),
    })
}
