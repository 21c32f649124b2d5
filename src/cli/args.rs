//! Command line argument parsing and validation.
//!
//! Every setting that used to be read from the process environment is a
//! clap argument with an `env` fallback, so the environment is consulted
//! exactly once, at startup.

use clap::Parser;
use std::path::PathBuf;
use url::Url;

use super::docker::DEFAULT_REPOSITORY;
use crate::source::{RC_MANIFEST_URL, VERSIONS_URL};

/// Salesforce CLI container image publisher
#[derive(Parser, Debug)]
#[command(
    name = "sfdx_docker_publish",
    version,
    about = "Build, tag and publish the slim and full Salesforce CLI images",
    long_about = "Builds the slim and full Salesforce CLI Docker images and pushes them to Docker Hub.

Run without any environment changes to build, tag and push both images as latest-rc.

Manual runs:
  1. log in to the registry first: docker login
  2. pin the version: SALESFORCE_CLI_VERSION=7.100.0 sfdx_docker_publish
  3. add NO_PUBLISH=true to only build locally

A pinned version is pushed under its own tags but never moves latest-rc."
)]
pub struct Args {
    /// Salesforce CLI version to build instead of the package.json version
    #[arg(long = "cli-version", env = "SALESFORCE_CLI_VERSION", value_name = "VERSION")]
    pub cli_version: Option<String>,

    /// Only build the images locally, never push or tag.
    /// Any non-empty value counts, including "false" and "0".
    #[arg(
        long,
        env = "NO_PUBLISH",
        value_name = "ANY",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub no_publish: Option<String>,

    /// package.json providing the default version
    #[arg(long, env = "PACKAGE_JSON_PATH", value_name = "PATH", default_value = "package.json")]
    pub package_json: PathBuf,

    /// Registry repository the images are tagged and pushed under
    #[arg(long, env = "DOCKER_HUB_REPOSITORY", value_name = "REPO", default_value = DEFAULT_REPOSITORY)]
    pub repository: String,

    /// JSON file mapping released versions to tarball URLs
    #[arg(long, env = "SFDX_VERSIONS_URL", value_name = "URL", default_value = VERSIONS_URL)]
    pub versions_url: Url,

    /// Build manifest of the current stable-rc build
    #[arg(long, env = "SFDX_RC_MANIFEST_URL", value_name = "URL", default_value = RC_MANIFEST_URL)]
    pub manifest_url: Url,

    /// Docker build context holding the dockerfiles/ directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub context: PathBuf,

    /// Print extra diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors, hiding docker output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.repository.trim().is_empty() {
            return Err("Repository cannot be empty".to_string());
        }

        // Tags are derived from the version; the repository must not carry one.
        let last_segment = self.repository.rsplit('/').next().unwrap_or_default();
        if last_segment.contains(':') || self.repository.contains('@') {
            return Err(format!(
                "Repository must not include a tag or digest: {}",
                self.repository
            ));
        }

        Ok(())
    }

    /// Whether publishing is disabled; any non-empty value disables it
    pub fn publishing_disabled(&self) -> bool {
        self.no_publish.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Explicit version, when one was supplied
    pub version_override: Option<String>,
    /// Stop after building
    pub no_publish: bool,
    /// Fallback version source
    pub package_json: PathBuf,
    /// Registry repository, without tag
    pub repository: String,
    /// Primary lookup endpoint
    pub versions_url: Url,
    /// Release candidate lookup endpoint
    pub manifest_url: Url,
    /// Docker build context
    pub context: PathBuf,
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let mut config = Self::new(
            args.repository.trim(),
            args.versions_url.clone(),
            args.manifest_url.clone(),
            super::OutputManager::new(args.verbose, args.quiet),
        );
        config.version_override = args.cli_version.clone();
        config.no_publish = args.publishing_disabled();
        config.package_json = args.package_json.clone();
        config.context = args.context.clone();
        config
    }
}

impl RuntimeConfig {
    /// Configuration for the default flow: version from `./package.json`,
    /// publishing enabled, build context `.`.
    pub fn new(
        repository: &str,
        versions_url: Url,
        manifest_url: Url,
        output: super::OutputManager,
    ) -> Self {
        Self {
            version_override: None,
            no_publish: false,
            package_json: PathBuf::from("package.json"),
            repository: repository.to_string(),
            versions_url,
            manifest_url,
            context: PathBuf::from("."),
            output,
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) {
        self.output.success(message);
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print progress message
    pub fn progress(&self, message: &str) {
        self.output.progress(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        self.output.section(title);
    }
}
