//! Build and publish pipeline for the Salesforce CLI Docker images.
//!
//! - [`metadata`] resolves the release version
//! - [`source`] finds the tarball download URL for that version
//! - [`cli`] drives the docker builds, pushes and latest-rc tagging

pub mod cli;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{CliError, PublishError, Result};
