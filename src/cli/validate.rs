//! `validate` command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::builder::MemoryBuilder;
use crate::config::BuilderConfig;

/// Resolve the profile and instructions closures without writing.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Root profile (defaults to `settings.profile`)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Validate the `CONTAINER` instructions root instead of `LOCAL`
    #[arg(short, long)]
    pub container: bool,
}

impl ValidateCommand {
    pub fn execute(self, config: &BuilderConfig, quiet: bool) -> Result<()> {
        let compiled = MemoryBuilder::new(config).validate(self.profile.as_deref(), self.container)?;

        if !quiet {
            println!(
                "{} {} resolves to {} profile(s)",
                "✓".green(),
                compiled.profile,
                compiled.profiles.len()
            );
            println!(
                "{} {} resolves to {} instruction set(s)",
                "✓".green(),
                compiled.instructions_root,
                compiled.instructions.len()
            );
        }
        Ok(())
    }
}
