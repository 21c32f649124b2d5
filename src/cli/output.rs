//! Terminal output for publish progress.
//!
//! Writes are best effort: a closed stdout (e.g. piped into `head`) must not
//! interrupt a publish that is halfway through pushing.

use colored::Colorize;
use std::io::{self, Write};

/// Colored terminal output honoring verbose and quiet modes.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether verbose messages are printed
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.is_verbose() {
            let _ = writeln!(io::stdout(), "{}", message.dimmed());
        }
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            let _ = writeln!(io::stdout(), "{} {}", "→".cyan().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            let _ = writeln!(io::stdout(), "{} {}", "✓".green().bold(), message);
        }
    }

    /// Print a warning to stderr
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            let _ = writeln!(io::stderr(), "{} {}", "⚠".yellow().bold(), message.yellow());
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if !self.quiet {
            let _ = writeln!(io::stdout(), "\n{}", title.bold().underline());
        }
    }

    /// Print indented text, used for streamed child process output
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            let _ = writeln!(io::stdout(), "    {}", message);
        }
    }
}
