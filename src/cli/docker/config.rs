//! Docker image configuration and constants.

use std::time::Duration;

/// Docker Hub repository the Salesforce CLI images are published under
pub const DEFAULT_REPOSITORY: &str = "salesforce/salesforcedx";

/// Floating tag prefix for the newest default release candidate build
pub const LATEST_RC_ALIAS: &str = "latest-rc";

/// Dockerfile for the slim image, relative to the build context
pub const SLIM_DOCKERFILE: &str = "./dockerfiles/Dockerfile_slim";

/// Dockerfile for the full image, relative to the build context
pub const FULL_DOCKERFILE: &str = "./dockerfiles/Dockerfile_full";

/// Timeout for Docker info check (5 seconds)
/// Quick daemon availability check shouldn't take long
pub const DOCKER_INFO_TIMEOUT: Duration = Duration::from_secs(5);

/// Platform-specific Docker startup instructions
#[cfg(target_os = "macos")]
pub const DOCKER_START_HELP: &str = "Start Docker Desktop from Applications or Spotlight";

#[cfg(target_os = "linux")]
pub const DOCKER_START_HELP: &str = "Start Docker daemon: sudo systemctl start docker";

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub const DOCKER_START_HELP: &str = "Start Docker Desktop";
