//! Definition and configuration fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A definition file written into one of the content directories.
#[derive(Debug, Clone)]
pub struct DefinitionFixture {
    /// `profiles` or `instructions`
    pub kind: &'static str,
    /// `domain` or `common`
    pub scope: &'static str,
    /// Canonical node name; the file is named after its lowercase form
    pub name: String,
    pub content: String,
}

impl DefinitionFixture {
    pub fn new(kind: &'static str, scope: &'static str, name: &str, content: &str) -> Self {
        Self {
            kind,
            scope,
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    pub fn profile(scope: &'static str, name: &str, content: &str) -> Self {
        Self::new("profiles", scope, name, content)
    }

    pub fn instructions(scope: &'static str, name: &str, content: &str) -> Self {
        Self::new("instructions", scope, name, content)
    }

    /// Write under `root/<kind>/<scope>/<name>.yaml`.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        let dir = root.join(self.kind).join(self.scope);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.yaml", self.name.to_lowercase()));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// DEVELOPER → ENGINEER → COMMON plus LOCAL and CONTAINER instructions.
    ///
    /// DEVELOPER lives in the domain directory; the rest come from common.
    pub fn standard_set() -> Vec<Self> {
        vec![
            Self::profile(
                "domain",
                "DEVELOPER",
                r"DEVELOPER:
  description: Developer profile
  relations:
    - type: inherits
      target: ENGINEER
  practices:
    - Ship {{settings.plugin.framework.name}} {{settings.plugin.framework.version}}
",
            ),
            Self::profile(
                "common",
                "ENGINEER",
                r"ENGINEER:
  description: Engineer profile
  relations:
    - type: inherits
      target: COMMON
  diary: Write to {{settings.path.documentation.diary}}
",
            ),
            Self::profile(
                "common",
                "COMMON",
                r"COMMON:
  description: Shared foundation
  observations:
    - Keep {{settings.profile}} notes
",
            ),
            Self::instructions(
                "common",
                "LOCAL",
                r"LOCAL:
  description: Local instructions
  steps:
    - Read {{settings.skill.init}}
",
            ),
            Self::instructions(
                "common",
                "CONTAINER",
                r"CONTAINER:
  description: Container instructions
  steps:
    - Load {{settings.skill.methodology}}
",
            ),
        ]
    }
}

/// Configuration text for a fixture rooted at the configuration's directory.
///
/// Each `(key, value)` in `output` becomes a `build.output` entry.
pub fn standard_config(output: &[(&str, &str)]) -> String {
    let mut output_section = String::new();
    if !output.is_empty() {
        output_section.push_str("  output:\n");
        for (key, value) in output {
            output_section.push_str(&format!("    {key}: {value}\n"));
        }
    }

    format!(
        r"build:
  path:
    profiles:
      domain: profiles/domain
      common: profiles/common
    instructions:
      domain: instructions/domain
      common: instructions/common
{output_section}settings:
  profile: DEVELOPER
  version: 1.0.0
  relations:
    - inherits
    - references
  timezone: UTC
  path:
    documentation:
      diary: docs/diary
  plugins:
    core:
      - plugin:
          name: framework
          version: 1.0.0
        skills:
          init: framework-initialization
          methodology: framework-methodology
"
    )
}

/// A SKILL.md body carrying both injection marker pairs.
pub fn skill_document() -> &'static str {
    "# Framework Methodology\n\n\
     ## Instructions\n\n\
     <!-- framework-instructions-start -->\n<!-- framework-instructions-end -->\n\n\
     ## Methodology\n\n\
     <!-- framework-methodology-start -->\n<!-- framework-methodology-end -->\n"
}
