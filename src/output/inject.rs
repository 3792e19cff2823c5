//! Embedding artifacts into a SKILL.md file between comment markers.
//!
//! Each artifact owns a marker pair:
//!
//! ````text
//! <!-- framework-methodology-start -->
//! ```json
//! {"profiles":{...},"version":"1.0.0"}
//! ```
//! <!-- framework-methodology-end -->
//! ````
//!
//! Everything between the markers is replaced; the rest of the file is kept.

use regex::{Captures, Regex};
use std::path::Path;
use tracing::info;

use crate::core::BuilderError;
use crate::utils::safe_write;

/// Replace the block between `marker`'s start and end comments with a fenced
/// JSON block. Returns `None` when the marker pair is absent.
pub fn inject_block(content: &str, marker: &str, json: &str) -> Option<String> {
    let pattern = format!(
        r"(<!-- framework-{m}-start -->)[\s\S]*?(<!-- framework-{m}-end -->)",
        m = regex::escape(marker)
    );
    // The pattern is built from an escaped literal and always compiles.
    let regex = Regex::new(&pattern).ok()?;
    if !regex.is_match(content) {
        return None;
    }
    let replaced = regex.replace(content, |caps: &Captures<'_>| {
        format!("{}\n```json\n{json}\n```\n{}", &caps[1], &caps[2])
    });
    Some(replaced.into_owned())
}

/// Inject every `(marker, json)` block into the file at `path` and persist it atomically.
///
/// The file is only rewritten when all markers are present.
pub fn inject_into_skill(path: &Path, blocks: &[(&str, String)]) -> Result<(), BuilderError> {
    let write_error = |reason: String| BuilderError::OutputWriteError {
        path: path.display().to_string(),
        reason,
    };

    let mut content = std::fs::read_to_string(path).map_err(|e| write_error(e.to_string()))?;
    for (marker, json) in blocks {
        content = inject_block(&content, marker, json).ok_or_else(|| {
            BuilderError::MarkerNotFound {
                path: path.display().to_string(),
                marker: (*marker).to_string(),
            }
        })?;
    }

    safe_write(path, &content).map_err(|e| write_error(format!("{e:#}")))?;
    info!("Injected {} block(s) into {}", blocks.len(), path.display());
    Ok(())
}
