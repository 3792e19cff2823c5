//! On-disk builder fixture.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::{DefinitionFixture, skill_document, standard_config};
use crate::config::BuilderConfig;

/// A temporary directory holding `builder.yaml` and definition trees.
///
/// Layout:
///
/// ```text
/// <root>/builder.yaml
/// <root>/profiles/{domain,common}/*.yaml
/// <root>/instructions/{domain,common}/*.yaml
/// ```
pub struct BuilderFixture {
    pub temp_dir: TempDir,
    output: Vec<(String, String)>,
}

impl BuilderFixture {
    /// Empty content directories and the standard configuration.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        for dir in ["profiles/domain", "profiles/common", "instructions/domain", "instructions/common"] {
            fs::create_dir_all(temp_dir.path().join(dir))?;
        }
        let fixture = Self {
            temp_dir,
            output: Vec::new(),
        };
        fixture.write_config()?;
        Ok(fixture)
    }

    /// The standard DEVELOPER → ENGINEER → COMMON set with both instruction roots.
    pub fn standard() -> Result<Self> {
        let fixture = Self::new()?;
        for definition in DefinitionFixture::standard_set() {
            definition.write_to(fixture.root())?;
        }
        Ok(fixture)
    }

    /// Send both artifacts to `out/memory.json` and `out/instructions.json`.
    pub fn with_file_outputs(self) -> Result<Self> {
        self.with_output("profiles", "out/memory.json")?
            .with_output("instructions", "out/instructions.json")
    }

    /// Add a SKILL.md with both marker pairs and point `build.output.skill` at it.
    pub fn with_skill(self) -> Result<Self> {
        let skill = self.root().join("skills/SKILL.md");
        if let Some(parent) = skill.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&skill, skill_document())?;
        self.with_output("skill", "skills/SKILL.md")
    }

    /// Set one `build.output` entry and rewrite the configuration.
    pub fn with_output(mut self, key: &str, value: &str) -> Result<Self> {
        self.output.retain(|(k, _)| k != key);
        self.output.push((key.to_string(), value.to_string()));
        self.write_config()?;
        Ok(self)
    }

    /// Write or replace a definition file.
    pub fn add_definition(&self, definition: &DefinitionFixture) -> Result<()> {
        definition.write_to(self.root())
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("builder.yaml")
    }

    pub fn skill_path(&self) -> PathBuf {
        self.root().join("skills/SKILL.md")
    }

    /// Load the configuration, ignoring any `FRAMEWORK_*` variables in the
    /// process environment.
    pub fn load_config(&self) -> Result<BuilderConfig> {
        self.load_config_with(&[])
    }

    /// Load the configuration with `overrides` standing in for the environment.
    pub fn load_config_with(&self, overrides: &[(&str, &str)]) -> Result<BuilderConfig> {
        BuilderConfig::load_with(&self.config_path(), |name| {
            overrides.iter().find(|(variable, _)| *variable == name).map(|(_, v)| v.to_string())
        })
        .with_context(|| format!("Failed to load {}", self.config_path().display()))
    }

    fn write_config(&self) -> Result<()> {
        let output: Vec<(&str, &str)> =
            self.output.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        fs::write(self.config_path(), standard_config(&output))
            .with_context(|| format!("Failed to write {}", self.config_path().display()))
    }
}
