use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{ReleaseError, Result};

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionBump {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(ReleaseError::invalid_version(format!(
                "unknown version type '{}'. Use: patch, minor, or major",
                other
            ))),
        }
    }
}

fn version_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(-[A-Za-z0-9_.-]+)?$"))
        .as_ref()
        .map_err(|e| ReleaseError::invalid_version(format!("version pattern: {}", e)))
}

/// Checks an explicitly supplied version string.
///
/// Accepts `MAJOR.MINOR.PATCH` with an optional `-prerelease` suffix and
/// nothing else: no `v` prefix, no fourth component, no build metadata.
/// Digits and suffix characters are ASCII only.
pub fn validate_version(candidate: &str) -> Result<()> {
    if version_pattern()?.is_match(candidate) {
        Ok(())
    } else {
        Err(ReleaseError::invalid_version(format!(
            "'{}' is not a semantic version (e.g., 1.0.0 or 1.0.0-beta.1)",
            candidate
        )))
    }
}

/// Parses the version recorded in a manifest.
pub fn parse_version(raw: &str) -> Result<Version> {
    Version::parse(raw.trim()).map_err(|e| {
        ReleaseError::invalid_version(format!("cannot parse '{}': {}", raw, e))
    })
}

/// Bumps a version according to the specified bump type.
///
/// Increments the appropriate component and resets lower components to 0:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// Pre-release and build metadata are dropped from the result.
pub fn bump_version(version: &Version, bump: VersionBump) -> Result<Version> {
    let overflow = || {
        ReleaseError::invalid_version(format!("cannot bump {} {}: overflow", bump, version))
    };

    let (major, minor, patch) = match bump {
        VersionBump::Major => (version.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        VersionBump::Minor => (
            version.major,
            version.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        VersionBump::Patch => (
            version.major,
            version.minor,
            version.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };

    Ok(Version {
        major,
        minor,
        patch,
        pre: Prerelease::EMPTY,
        build: BuildMetadata::EMPTY,
    })
}
