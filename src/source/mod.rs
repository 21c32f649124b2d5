//! Download URL resolution for Salesforce CLI release tarballs.
//!
//! Released versions are listed in a versions file. A release candidate
//! only reaches that file once it is promoted, so until then the stable-rc
//! build manifest is the place to find it.

use crate::error::{PublishError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Versions file mapping each released version to its linux-x64 tarball
pub const VERSIONS_URL: &str =
    "https://developer.salesforce.com/media/salesforce-cli/sfdx/versions/sfdx-linux-x64-tar-xz.json";

/// Build manifest of the current stable-rc build
pub const RC_MANIFEST_URL: &str = "https://developer.salesforce.com/media/salesforce-cli/sfdx/channels/stable-rc/sfdx-linux-x64-buildmanifest";

/// Places a download URL can be found, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    VersionsFile,
    RcBuildManifest,
}

impl LookupSource {
    pub const ORDER: [LookupSource; 2] = [LookupSource::VersionsFile, LookupSource::RcBuildManifest];

    pub fn describe(self) -> &'static str {
        match self {
            Self::VersionsFile => "versions file",
            Self::RcBuildManifest => "latest-rc build manifest",
        }
    }
}

#[derive(Deserialize)]
struct BuildManifest {
    version: Option<String>,
    xz: Option<String>,
}

/// Looks up the tarball URL for a version across the lookup sources.
pub struct DownloadResolver {
    client: reqwest::Client,
    versions_url: Url,
    manifest_url: Url,
}

impl DownloadResolver {
    pub fn new(versions_url: Url, manifest_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), versions_url, manifest_url)
    }

    pub fn with_client(client: reqwest::Client, versions_url: Url, manifest_url: Url) -> Self {
        Self {
            client,
            versions_url,
            manifest_url,
        }
    }

    /// Returns the download URL for `version` from the first source that
    /// knows it. Later sources are not contacted after a hit.
    pub async fn resolve(&self, version: &str) -> Result<String> {
        for source in LookupSource::ORDER {
            if let Some(url) = self.lookup(source, version).await? {
                log::info!("Found download URL {} in {}", url, source.describe());
                return Ok(url);
            }
            log::debug!("Version {} not in {}", version, source.describe());
        }

        Err(PublishError::VersionNotFound {
            version: version.to_string(),
        })
    }

    async fn lookup(&self, source: LookupSource, version: &str) -> Result<Option<String>> {
        match source {
            LookupSource::VersionsFile => {
                let versions: serde_json::Map<String, serde_json::Value> =
                    self.fetch_json(&self.versions_url).await?;
                Ok(versions
                    .get(version)
                    .and_then(|url| url.as_str())
                    .filter(|url| !url.is_empty())
                    .map(String::from))
            }
            LookupSource::RcBuildManifest => {
                let manifest: BuildManifest = self.fetch_json(&self.manifest_url).await?;
                if manifest.version.as_deref() != Some(version) {
                    return Ok(None);
                }
                Ok(manifest.xz.filter(|url| !url.is_empty()))
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let http_error = |source: reqwest::Error| PublishError::Http {
            url: url.to_string(),
            source,
        };

        log::debug!("Fetching {}", url);
        self.client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(http_error)?
            .json::<T>()
            .await
            .map_err(http_error)
    }
}
