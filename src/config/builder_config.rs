//! Typed builder configuration.
//!
//! A [`BuilderConfig`] is produced from the parsed configuration tree after
//! environment overrides have been applied. Construction validates required
//! keys and resolves every `build.*` path against the directory holding the
//! configuration file.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::overrides::apply_overrides;
use super::parser::parse_config_file;
use crate::constants::{INHERITS_RELATION, STDOUT_DESTINATION};
use crate::core::BuilderError;
use crate::output::{Destination, Timezone};
use crate::utils::resolve_relative_to;

/// Domain and common lookup directories for one kind of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    /// Searched first
    pub domain: PathBuf,
    /// Fallback when the domain directory has no definition
    pub common: PathBuf,
}

/// Where the build writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub profiles: Destination,
    pub instructions: Destination,
    /// SKILL.md file that receives both artifacts between markers.
    pub skill: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            profiles: Destination::Stdout,
            instructions: Destination::Stdout,
            skill: None,
        }
    }
}

/// The `build` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub profiles: ContentPaths,
    pub instructions: ContentPaths,
    pub output: OutputConfig,
}

/// The `settings` section.
///
/// The typed fields are read out of the raw mapping, which is kept whole so
/// every key can be exposed as a `{{settings.*}}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Default root profile name
    pub profile: String,
    /// Stamped into every artifact
    pub version: String,
    /// Allow-list of relation types
    pub relations: Vec<String>,
    pub timezone: Timezone,
    values: Map<String, Value>,
}

impl Settings {
    /// Read the typed settings out of the raw `settings` mapping.
    pub fn from_map(values: Map<String, Value>) -> Result<Self, BuilderError> {
        let profile = match values.get("profile") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return Err(invalid("settings.profile is required")),
        };

        let version = match values.get("version") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(invalid("settings.version is required")),
        };

        let relations = match values.get("relations") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("settings.relations must be a list of strings"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(invalid("settings.relations must be a non-empty list")),
        };
        if relations.is_empty() {
            return Err(invalid("settings.relations must be a non-empty list"));
        }
        if !relations.iter().any(|r| r == INHERITS_RELATION) {
            return Err(invalid(format!("settings.relations must include '{INHERITS_RELATION}'")));
        }

        let timezone = match values.get("timezone") {
            None | Some(Value::Null) => Timezone::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(invalid("settings.timezone must be a string")),
        };

        Ok(Self {
            profile,
            version,
            relations,
            timezone,
            values,
        })
    }

    /// The full settings mapping, used to build placeholders.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// Complete, validated builder configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    pub build: BuildConfig,
    pub settings: Settings,
    /// Directory relative paths were resolved against
    pub base_dir: PathBuf,
}

impl BuilderConfig {
    /// Load, override from the environment, and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, BuilderError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`BuilderConfig::load`], reading override variables through `lookup`.
    pub fn load_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BuilderError> {
        let mut value = parse_config_file(path)?;
        apply_overrides(&mut value, lookup);

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        debug!("Loaded configuration from {}", path.display());
        Self::from_value(value, &base_dir)
    }

    /// Build a configuration from an already parsed tree.
    pub fn from_value(value: Value, base_dir: &Path) -> Result<Self, BuilderError> {
        let Value::Object(mut root) = value else {
            return Err(invalid("configuration must be a mapping"));
        };

        let settings = match root.remove("settings") {
            Some(Value::Object(map)) => Settings::from_map(map)?,
            _ => return Err(invalid("settings section is required")),
        };

        let build = root.remove("build").unwrap_or(Value::Null);
        let build = BuildConfig {
            profiles: content_paths(&build, "profiles", base_dir)?,
            instructions: content_paths(&build, "instructions", base_dir)?,
            output: output_config(&build, base_dir)?,
        };

        Ok(Self {
            build,
            settings,
            base_dir: base_dir.to_path_buf(),
        })
    }
}

fn invalid(reason: impl Into<String>) -> BuilderError {
    BuilderError::ConfigValidationError {
        reason: reason.into(),
    }
}

fn required_str<'a>(build: &'a Value, pointer: &str) -> Result<&'a str, BuilderError> {
    build
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(format!("build{} is required", pointer.replace('/', "."))))
}

fn resolve(base_dir: &Path, raw: &str) -> Result<PathBuf, BuilderError> {
    resolve_relative_to(base_dir, raw).map_err(|e| invalid(format!("{e:#}")))
}

fn content_paths(build: &Value, kind: &str, base_dir: &Path) -> Result<ContentPaths, BuilderError> {
    let domain = required_str(build, &format!("/path/{kind}/domain"))?;
    let common = required_str(build, &format!("/path/{kind}/common"))?;
    Ok(ContentPaths {
        domain: resolve(base_dir, domain)?,
        common: resolve(base_dir, common)?,
    })
}

fn destination(build: &Value, key: &str, base_dir: &Path) -> Result<Destination, BuilderError> {
    match build.pointer(&format!("/output/{key}")) {
        None | Some(Value::Null) => Ok(Destination::Stdout),
        Some(Value::String(raw)) if raw == STDOUT_DESTINATION => Ok(Destination::Stdout),
        Some(Value::String(raw)) => Ok(Destination::File(resolve(base_dir, raw)?)),
        Some(_) => Err(invalid(format!("build.output.{key} must be a path or '{STDOUT_DESTINATION}'"))),
    }
}

fn output_config(build: &Value, base_dir: &Path) -> Result<OutputConfig, BuilderError> {
    let skill = match build.pointer("/output/skill") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(resolve(base_dir, raw)?),
        Some(_) => return Err(invalid("build.output.skill must be a path")),
    };
    Ok(OutputConfig {
        profiles: destination(build, "profiles", base_dir)?,
        instructions: destination(build, "instructions", base_dir)?,
        skill,
    })
}
