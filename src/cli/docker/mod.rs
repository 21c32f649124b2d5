//! Docker integration for building and publishing the CLI images.
//!
//! # Module Structure
//!
//! - `availability` - Docker installation and daemon checks
//! - `config` - Repository, dockerfile and alias constants
//! - `image` - Image variants and tag references
//! - `runner` - The command runner seam and the real docker CLI runner

mod availability;
mod config;
mod image;
#[cfg(test)]
pub(crate) mod recording;
mod runner;

pub use config::{DEFAULT_REPOSITORY, LATEST_RC_ALIAS};
pub use image::{ImageRef, Variant};
pub use runner::{CommandRunner, DockerCli};
