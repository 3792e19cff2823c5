//! Artifact destinations and the writer that persists to them.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::STDOUT_DESTINATION;
use crate::core::BuilderError;
use crate::utils::{atomic_write, resolve_relative_to};

/// Where an artifact goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Pretty-printed to standard output
    Stdout,
    /// Compact JSON written durably to a file
    File(PathBuf),
}

impl Destination {
    /// Parse a configured destination: `stdout` or a path resolved against `base`.
    pub fn parse(raw: &str, base: &Path) -> anyhow::Result<Self> {
        if raw.is_empty() || raw == STDOUT_DESTINATION {
            return Ok(Self::Stdout);
        }
        Ok(Self::File(resolve_relative_to(base, raw)?))
    }

    /// The file path, if this is a file destination.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str(STDOUT_DESTINATION),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serializes documents to a [`Destination`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `data` to `destination`, using the process stdout for [`Destination::Stdout`].
    pub fn write<T: Serialize>(
        &self,
        data: &T,
        destination: &Destination,
    ) -> Result<(), BuilderError> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_with(data, destination, &mut lock)
    }

    /// Write `data` to `destination`, sending console output to `console`.
    ///
    /// Console output is pretty-printed with a trailing newline. Files get
    /// compact JSON through an atomic write; any failure is reported as
    /// [`BuilderError::OutputWriteError`] naming the resolved path.
    pub fn write_with<T: Serialize, W: Write>(
        &self,
        data: &T,
        destination: &Destination,
        console: &mut W,
    ) -> Result<(), BuilderError> {
        match destination {
            Destination::Stdout => {
                let rendered = serde_json::to_string_pretty(data).map_err(|e| {
                    BuilderError::OutputWriteError {
                        path: STDOUT_DESTINATION.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                writeln!(console, "{rendered}").map_err(|e| BuilderError::OutputWriteError {
                    path: STDOUT_DESTINATION.to_string(),
                    reason: e.to_string(),
                })
            }
            Destination::File(path) => {
                let resolved = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                let write_error = |reason: String| BuilderError::OutputWriteError {
                    path: resolved.display().to_string(),
                    reason,
                };
                let content = serde_json::to_vec(data).map_err(|e| write_error(e.to_string()))?;
                atomic_write(&resolved, &content).map_err(|e| write_error(format!("{e:#}")))?;
                info!("Wrote {} ({} bytes)", resolved.display(), content.len());
                Ok(())
            }
        }
    }
}
