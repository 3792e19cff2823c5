//! Configuration file parsing.
//!
//! The builder configuration is YAML by default. A `.toml` extension selects
//! TOML instead. Both are parsed into the same untyped tree so overrides and
//! validation work identically for either format.

use serde_json::Value;
use std::path::Path;

use crate::core::BuilderError;

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`, or anything unrecognized)
    Yaml,
    /// TOML (`.toml`)
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Read and parse a configuration file into an untyped tree.
pub fn parse_config_file(path: &Path) -> Result<Value, BuilderError> {
    if !path.is_file() {
        return Err(BuilderError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| BuilderError::ConfigParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_config_str(&content, ConfigFormat::from_path(path)).map_err(|reason| {
        BuilderError::ConfigParseError {
            file: path.display().to_string(),
            reason,
        }
    })
}

/// Parse configuration text in the given format.
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<Value, String> {
    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}
