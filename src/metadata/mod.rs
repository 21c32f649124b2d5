//! Release version resolution from an override or package.json

use crate::error::{PublishError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Where the release version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrigin {
    /// Supplied explicitly; a deliberate, non-default release
    Override,
    /// Read from package.json; the default latest-rc flow
    Manifest,
}

/// The Salesforce CLI version being published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    pub value: String,
    pub origin: VersionOrigin,
}

impl ReleaseVersion {
    pub fn is_override(&self) -> bool {
        self.origin == VersionOrigin::Override
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The only package.json field we care about
#[derive(Deserialize)]
struct PackageJson {
    version: Option<String>,
}

/// Reads the `version` field of a package.json file.
pub fn read_package_version(package_json: &Path) -> Result<Option<String>> {
    let contents = std::fs::read_to_string(package_json).map_err(|e| {
        PublishError::UnresolvedVersion {
            reason: format!("Failed to read {}: {}", package_json.display(), e),
        }
    })?;

    let manifest: PackageJson = serde_json::from_str(&contents)?;
    Ok(manifest.version)
}

/// Resolves the version to publish.
///
/// An override wins and package.json is not touched. An override that is
/// blank, or a package.json without a usable `version`, is an error.
pub fn resolve_version(version_override: Option<&str>, package_json: &Path) -> Result<ReleaseVersion> {
    let version = match version_override {
        Some(value) => ReleaseVersion {
            value: value.trim().to_string(),
            origin: VersionOrigin::Override,
        },
        None => ReleaseVersion {
            value: read_package_version(package_json)?
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            origin: VersionOrigin::Manifest,
        },
    };

    if version.value.is_empty() {
        return Err(PublishError::UnresolvedVersion {
            reason: match version.origin {
                VersionOrigin::Override => "the version override is empty".to_string(),
                VersionOrigin::Manifest => {
                    format!("{} has no version field", package_json.display())
                }
            },
        });
    }

    if let Err(e) = semver::Version::parse(&version.value) {
        log::warn!("Version {} is not valid semver: {}", version.value, e);
    }

    Ok(version)
}
