//! External docker command execution.
//!
//! The publish flow only talks to docker through [`CommandRunner`], so tests
//! can swap in a runner that records invocations instead of spawning them.

use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::availability::check_docker_available;
use super::image::{ImageRef, Variant};

/// Narrow interface over the docker CLI.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Fails with `MissingEnvironment` when docker cannot be used at all.
    async fn ensure_available(&self) -> Result<()>;

    /// Runs `docker <args>` to completion; a non-zero exit is an error.
    async fn docker(&self, args: &[String]) -> Result<()>;

    /// `docker build --file <dockerfile> --build-arg <arg> --tag <image> --no-cache .`
    async fn build(&self, variant: Variant, build_arg: &str, image: &ImageRef) -> Result<()> {
        let args = [
            "build".to_string(),
            "--file".to_string(),
            variant.dockerfile().to_string(),
            "--build-arg".to_string(),
            build_arg.to_string(),
            "--tag".to_string(),
            image.to_string(),
            "--no-cache".to_string(),
            ".".to_string(),
        ];
        self.docker(&args).await
    }

    async fn push(&self, image: &ImageRef) -> Result<()> {
        self.docker(&["push".to_string(), image.to_string()]).await
    }

    async fn tag(&self, source: &ImageRef, target: &ImageRef) -> Result<()> {
        self.docker(&["tag".to_string(), source.to_string(), target.to_string()])
            .await
    }
}

/// Runs the real docker CLI inside the build context, streaming its output.
pub struct DockerCli {
    program: PathBuf,
    context: PathBuf,
    output: OutputManager,
}

impl DockerCli {
    /// Creates a runner for `docker` on PATH whose commands execute in `context`.
    pub fn new(context: PathBuf, output: OutputManager) -> Self {
        Self::with_program(PathBuf::from("docker"), context, output)
    }

    /// Same as [`DockerCli::new`] with an explicit docker executable.
    pub fn with_program(program: PathBuf, context: PathBuf, output: OutputManager) -> Self {
        Self {
            program,
            context,
            output,
        }
    }
}

impl CommandRunner for DockerCli {
    async fn ensure_available(&self) -> Result<()> {
        check_docker_available(&self.program).await
    }

    async fn docker(&self, args: &[String]) -> Result<()> {
        let command_line = format!("docker {}", args.join(" "));
        log::info!("Running: {}", command_line);

        // Spawn with piped stdout and stderr for streaming
        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.context)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CliError::ExecutionFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        let output = &self.output;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // A full pipe blocks docker, so both are drained at once
        tokio::join!(
            async move {
                if let Some(stdout) = stdout {
                    let mut lines = BufReader::new(stdout).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        output.indent(&line);
                    }
                }
            },
            async move {
                if let Some(stderr) = stderr {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        output.indent(&line);
                    }
                }
            }
        );

        let status = child.wait().await.map_err(|e| CliError::ExecutionFailed {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            return Err(CliError::ExecutionFailed {
                command: command_line,
                reason: format!("exited with code: {}", status.code().unwrap_or(-1)),
            }
            .into());
        }

        Ok(())
    }
}
