//! Error types for image publishing operations.
//!
//! Every failure is fatal: the publish flow stops at the first error and
//! nothing already built or pushed is rolled back.

use thiserror::Error;

/// Result type alias for publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// CLI argument and external command errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Required tooling is absent or unusable
    #[error("Missing environment: {tool} - {reason}")]
    MissingEnvironment {
        /// Tool that could not be used
        tool: String,
        /// What went wrong
        reason: String,
    },

    /// Neither an override nor package.json produced a version
    #[error("No Salesforce CLI version was available: {reason}")]
    UnresolvedVersion {
        /// Why resolution failed
        reason: String,
    },

    /// No lookup source knows a download URL for the version
    #[error("could not find version {version}")]
    VersionNotFound {
        /// Requested version
        version: String,
    },

    /// Metadata endpoint could not be fetched or decoded
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        /// Endpoint that failed
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingEnvironment { .. } => vec![
                "Install Docker and make sure the daemon is running".to_string(),
                "Log in to the registry with `docker login` before publishing".to_string(),
            ],
            Self::UnresolvedVersion { .. } => vec![
                "Set SALESFORCE_CLI_VERSION, e.g. SALESFORCE_CLI_VERSION=7.100.0".to_string(),
                "Or run from a directory whose package.json has a version field".to_string(),
            ],
            Self::VersionNotFound { .. } => vec![
                "Check that the version has been released or is the current stable-rc build"
                    .to_string(),
            ],
            Self::Cli(CliError::ExecutionFailed { .. }) => vec![
                "Images already pushed were left in place; rerun once the failure is fixed"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
