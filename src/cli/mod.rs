//! Command line interface for the image publisher.
//!
//! Parses arguments once into a [`RuntimeConfig`], then hands it to the
//! publish command together with the real docker runner.

mod args;
pub mod commands;
pub mod docker;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::source::DownloadResolver;
use commands::{PublishReport, publish_images};
use docker::DockerCli;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let resolver = DownloadResolver::new(config.versions_url.clone(), config.manifest_url.clone());
    let runner = DockerCli::new(config.context.clone(), config.output().clone());

    let report = publish_images(&config, &resolver, &runner).await?;
    print_summary(&config, &report);

    Ok(0)
}

fn print_summary(config: &RuntimeConfig, report: &PublishReport) {
    config.section("Summary");
    for image in &report.built {
        let pushed = report.pushed.contains(image);
        config.success(&format!(
            "{} ({})",
            image,
            if pushed { "pushed" } else { "local only" }
        ));
    }
    for alias in &report.aliased {
        config.success(&format!("{} (pushed)", alias));
    }
}
