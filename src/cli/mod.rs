//! Command-line interface for the memory builder.
//!
//! # Available Commands
//!
//! - `build` - Compile profiles and instructions and write both artifacts
//! - `status` - Print the default profile and the current timestamp
//! - `validate` - Resolve both closures without writing anything
//!
//! # Global Options
//!
//! - `--config <FILE>` - Configuration file (default `builder.yaml`)
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//!
//! Logs always go to stderr so stdout stays machine-readable.
//!
//! ```bash
//! memory-builder build --profile ENGINEER --output resources/memory.json
//! memory-builder --config ci/builder.toml validate
//! memory-builder status
//! ```

pub mod build;
pub mod status;
pub mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::BuilderConfig;
use crate::constants::DEFAULT_CONFIG_FILE;

/// Top-level command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "memory-builder",
    about = "Compile inheritable profile and instruction definitions into ordered JSON artifacts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to `RUST_LOG=debug`).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors and requested documents.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the builder configuration file.
    ///
    /// Relative paths inside the file resolve against its directory.
    #[arg(long, global = true, value_name = "FILE", env = "MEMORY_BUILDER_CONFIG")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile and write the profile and instructions artifacts
    Build(build::BuildCommand),

    /// Print the default profile with the current timestamp
    Status(status::StatusCommand),

    /// Check that a profile and its instructions resolve
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Initialize logging, load the configuration, and run the subcommand.
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        let config_path = self.config_path();
        debug!("Using configuration {}", config_path.display());
        let config = BuilderConfig::load(&config_path)
            .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

        match self.command {
            Commands::Build(cmd) => cmd.execute(config),
            Commands::Status(cmd) => cmd.execute(&config),
            Commands::Validate(cmd) => cmd.execute(&config, self.quiet),
        }
    }

    /// The configuration file to load.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Log filter for the verbosity flags; `None` disables logging.
    ///
    /// Without a flag, `RUST_LOG` is honoured and the fallback is `warn`.
    pub fn log_filter(&self) -> Option<EnvFilter> {
        if self.verbose {
            Some(EnvFilter::new("debug"))
        } else if self.quiet {
            None
        } else if std::env::var("RUST_LOG").is_ok() {
            Some(EnvFilter::from_default_env())
        } else {
            Some(EnvFilter::new("warn"))
        }
    }

    fn init_logging(&self) {
        if let Some(filter) = self.log_filter() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "memory-builder",
            "--config",
            "ci/builder.toml",
            "build",
            "-p",
            "engineer",
            "-c",
            "--output",
            "stdout",
        ])
        .unwrap();

        assert_eq!(cli.config_path(), PathBuf::from("ci/builder.toml"));
        match cli.command {
            Commands::Build(cmd) => {
                assert_eq!(cmd.profile.as_deref(), Some("engineer"));
                assert!(cmd.container);
                assert_eq!(cmd.output.as_deref(), Some("stdout"));
            }
            other => panic!("Expected build command, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["memory-builder", "status"]).unwrap();
        if std::env::var("MEMORY_BUILDER_CONFIG").is_err() {
            assert_eq!(cli.config_path(), PathBuf::from(DEFAULT_CONFIG_FILE));
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["memory-builder", "-v", "-q", "status"]).is_err());
    }

    #[test]
    fn test_quiet_disables_logging() {
        let cli = Cli::try_parse_from(["memory-builder", "validate", "--quiet"]).unwrap();
        assert!(cli.log_filter().is_none());

        let cli = Cli::try_parse_from(["memory-builder", "--verbose", "validate"]).unwrap();
        assert!(cli.log_filter().is_some());
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["memory-builder"]).is_err());
    }
}
