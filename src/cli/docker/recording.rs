//! In-memory runner that records docker invocations.

use crate::error::{CliError, PublishError, Result};
use std::sync::Mutex;

use super::runner::CommandRunner;

/// Records every docker command line instead of spawning it.
///
/// `fail_on` makes the first command starting with that subcommand fail,
/// `unavailable` makes the environment check fail.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Option<String>,
    unavailable: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(subcommand: &str) -> Self {
        Self {
            fail_on: Some(subcommand.to_string()),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Recorded invocations, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded invocations joined as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|args| args.join(" ")).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(PublishError::MissingEnvironment {
                tool: "docker".to_string(),
                reason: "not installed".to_string(),
            });
        }
        Ok(())
    }

    async fn docker(&self, args: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(args.to_vec());

        if let Some(subcommand) = &self.fail_on
            && args.first() == Some(subcommand)
        {
            return Err(CliError::ExecutionFailed {
                command: format!("docker {}", args.join(" ")),
                reason: "exited with code: 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
