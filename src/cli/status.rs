//! `status` command.

use anyhow::Result;
use clap::Args;

use crate::builder::MemoryBuilder;
use crate::config::BuilderConfig;

/// Print `{ "profile", "timestamp" }` for the configured default profile.
#[derive(Args, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    pub fn execute(self, config: &BuilderConfig) -> Result<()> {
        MemoryBuilder::new(config).status()?;
        Ok(())
    }
}
