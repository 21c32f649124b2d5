//! Image variants and the references they are tagged with.

use std::fmt;

use super::config::{FULL_DOCKERFILE, LATEST_RC_ALIAS, SLIM_DOCKERFILE};

/// The two published flavors of the Salesforce CLI image.
///
/// The slim image installs a tarball whose URL is resolved before the
/// build; the full image is handed only the version and fetches the CLI
/// itself during the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Slim,
    Full,
}

impl Variant {
    /// Build and push order
    pub const ALL: [Variant; 2] = [Variant::Slim, Variant::Full];

    /// Tag suffix
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Slim => "slim",
            Self::Full => "full",
        }
    }

    pub fn dockerfile(self) -> &'static str {
        match self {
            Self::Slim => SLIM_DOCKERFILE,
            Self::Full => FULL_DOCKERFILE,
        }
    }

    /// `--build-arg` value for this variant
    pub fn build_arg(self, version: &str, download_url: &str) -> String {
        match self {
            Self::Slim => format!("DOWNLOAD_URL={}", download_url),
            Self::Full => format!("SALESFORCE_CLI_VERSION={}", version),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A fully qualified `repository:tag` image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    /// `<repository>:<version>-<variant>`
    pub fn versioned(repository: &str, version: &str, variant: Variant) -> Self {
        Self {
            repository: repository.to_string(),
            tag: format!("{}-{}", version, variant.suffix()),
        }
    }

    /// `<repository>:latest-rc-<variant>`
    pub fn latest_rc(repository: &str, variant: Variant) -> Self {
        Self {
            repository: repository.to_string(),
            tag: format!("{}-{}", LATEST_RC_ALIAS, variant.suffix()),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
