use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReleaseError, Result};

/// The version published by the current build.
///
/// Either taken verbatim from a version tag on HEAD, or computed from the
/// commit history since the previous version tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseVersion {
    Tagged(String),
    Computed(String),
}

impl ReleaseVersion {
    pub fn as_str(&self) -> &str {
        match self {
            ReleaseVersion::Tagged(v) | ReleaseVersion::Computed(v) => v,
        }
    }

    /// True when HEAD itself carries the version tag
    pub fn is_tagged(&self) -> bool {
        matches!(self, ReleaseVersion::Tagged(_))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Bump `version`, resetting lower components and dropping any
    /// pre-release or build metadata
    pub fn apply(&self, version: &semver::Version) -> semver::Version {
        match self {
            VersionBump::Major => semver::Version::new(version.major + 1, 0, 0),
            VersionBump::Minor => semver::Version::new(version.major, version.minor + 1, 0),
            VersionBump::Patch => {
                semver::Version::new(version.major, version.minor, version.patch + 1)
            }
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Parse a plain `MAJOR.MINOR.PATCH` version
pub fn parse_version(text: &str) -> Result<semver::Version> {
    semver::Version::parse(text)
        .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", text, e)))
}
