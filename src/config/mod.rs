//! Builder configuration.
//!
//! The configuration file (`builder.yaml` by default, TOML when the file
//! ends in `.toml`) tells the builder where definitions live, where
//! artifacts go, and which settings are available for substitution.
//!
//! ```yaml
//! build:
//!   path:
//!     profiles:     { domain: profiles/domain, common: profiles/common }
//!     instructions: { domain: instructions/domain, common: instructions/common }
//!   output:
//!     profiles: resources/memory.json     # or "stdout" (default)
//!     instructions: resources/instructions.json
//!     skill: skills/framework/SKILL.md    # optional
//! settings:
//!   profile: DEVELOPER
//!   version: 1.0.0
//!   relations: [inherits]
//!   timezone: UTC
//! ```
//!
//! Loading happens in three steps: [`parser`] reads the file into an untyped
//! tree, [`overrides`] applies `FRAMEWORK_*` environment variables, and
//! [`BuilderConfig::from_value`] validates the tree and resolves relative
//! paths against the configuration file's directory.

mod builder_config;
pub mod overrides;
pub mod parser;

pub use builder_config::{BuildConfig, BuilderConfig, ContentPaths, OutputConfig, Settings};
pub use parser::{ConfigFormat, parse_config_file};
