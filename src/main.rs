//! Salesforce CLI image publisher.
//!
//! Builds the slim and full Salesforce CLI Docker images, pushes them and,
//! for default (package.json) versions, moves the latest-rc tags.

use sfdx_docker_publish::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  • {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
