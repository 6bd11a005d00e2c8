//! Command-line interface for javadoc-links.
//!
//! # Commands
//!
//! - `generate` - Write the javadoc options file for one or more resolution files
//! - `resolve` - Show the link a dependency coordinate resolves to
//! - `probe` - Check whether documentation URLs serve a javadoc index
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config` / `-c` - Project configuration file (default `javadoc-links.toml`)
//! - `--no-progress` - Disable spinners
//!
//! # Examples
//!
//! ```bash
//! # Generate links for two source sets, sharing one availability cache
//! javadoc-links generate build/main.resolution.toml build/test.resolution.toml
//!
//! # Offline build
//! javadoc-links generate --no-check build/main.resolution.toml
//!
//! # Where does a dependency link to?
//! javadoc-links resolve net.kyori:adventure-api:4.17.0
//! ```

mod generate;
mod probe;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use generate::GenerateCommand;
pub use probe::ProbeCommand;
pub use resolve::{CoordinateStatus, ResolveCommand, ResolvedCoordinate, resolve_coordinates};

/// Output format for commands that report results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text.
    #[default]
    Text,
    /// JSON for scripts.
    Json,
}

/// Settings derived from the global flags, handed to every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, `None` when quiet.
    pub log_level: Option<String>,
    /// Disable spinners.
    pub no_progress: bool,
    /// Suppress informational output.
    pub quiet: bool,
    /// Explicit project configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Whether spinners may be drawn.
    #[must_use]
    pub const fn progress_enabled(&self) -> bool {
        !self.no_progress && !self.quiet
    }
}

/// Generates javadoc `-link`/`-linkoffline` options from resolved dependencies.
#[derive(Parser, Debug)]
#[command(
    name = "javadoc-links",
    about = "Generate javadoc link options for resolved dependencies",
    version,
    long_about = "javadoc-links reads the resolved dependencies of a source set, maps each one to \
                  its hosted documentation, verifies the hosts are reachable and writes the \
                  -link/-linkoffline/-sourcepath options consumed by the javadoc tool."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`; an explicit `RUST_LOG` still wins.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project configuration file.
    ///
    /// Defaults to `javadoc-links.toml` in the current directory. Values are
    /// merged over the global configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress spinners.
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the options file for one or more resolution files.
    Generate(GenerateCommand),
    /// Print the documentation link of dependency coordinates.
    Resolve(ResolveCommand),
    /// Check documentation URLs for an element-list or package-list.
    Probe(ProbeCommand),
}

impl Cli {
    /// Translates the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Runs the selected command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Probe(cmd) => cmd.execute(&config).await,
        }
    }
}
