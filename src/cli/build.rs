//! `build` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::builder::MemoryBuilder;
use crate::config::BuilderConfig;
use crate::output::Destination;

/// Compile and write both artifacts.
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Root profile (defaults to `settings.profile`)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Use the `CONTAINER` instructions root instead of `LOCAL`
    #[arg(short, long)]
    pub container: bool,

    /// Profile artifact destination: a file path or `stdout`
    ///
    /// Overrides `build.output.profiles`. Relative paths resolve against the
    /// current directory.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,
}

impl BuildCommand {
    pub fn execute(self, mut config: BuilderConfig) -> Result<()> {
        if let Some(output) = &self.output {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            config.build.output.profiles = Destination::parse(output, &cwd)
                .with_context(|| format!("Invalid output destination: {output}"))?;
        }

        MemoryBuilder::new(&config).build(self.profile.as_deref(), self.container)?;
        Ok(())
    }
}
