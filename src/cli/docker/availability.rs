//! Docker installation and daemon availability checking.

use crate::error::{PublishError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;

use super::config::{DOCKER_INFO_TIMEOUT, DOCKER_START_HELP};

/// Checks that the docker CLI (`program`, looked up on PATH unless it is a
/// path) can be found and the daemon answers.
///
/// # Returns
///
/// * `Ok(())` - Docker is available
/// * `Err(PublishError::MissingEnvironment)` - Docker is not installed or
///   the daemon is not running
pub async fn check_docker_available(program: &Path) -> Result<()> {
    let docker = which::which(program).map_err(|e| PublishError::MissingEnvironment {
        tool: program.display().to_string(),
        reason: format!(
            "docker not found in PATH: {}\n\
             \n\
             Install from: https://docs.docker.com/get-docker/",
            e
        ),
    })?;
    log::debug!("Found docker at: {}", docker.display());

    let status_result = timeout(
        DOCKER_INFO_TIMEOUT,
        Command::new(&docker)
            .arg("info")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status(),
    )
    .await;

    match status_result {
        Err(_) => Err(PublishError::MissingEnvironment {
            tool: "docker info".to_string(),
            reason: format!(
                "Docker daemon check timed out after {} seconds.\n\
                 {}",
                DOCKER_INFO_TIMEOUT.as_secs(),
                DOCKER_START_HELP
            ),
        }),

        Ok(Ok(status)) if status.success() => Ok(()),

        Ok(Ok(status)) => Err(PublishError::MissingEnvironment {
            tool: "docker info".to_string(),
            reason: format!(
                "Docker daemon is not responding (exit code: {}).\n\
                 {}",
                status.code().unwrap_or(-1),
                DOCKER_START_HELP
            ),
        }),

        Ok(Err(e)) => Err(PublishError::MissingEnvironment {
            tool: "docker".to_string(),
            reason: format!("Failed to execute {}: {}", docker.display(), e),
        }),
    }
}
