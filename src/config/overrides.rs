//! Environment variable overrides for the configuration tree.

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{ENV_CONVERSATIONS, ENV_DIARY, ENV_OUTPUT, ENV_PROFILE, ENV_TIMEZONE};

/// Variable name and the configuration path it overrides.
const OVERRIDES: &[(&str, &[&str])] = &[
    (ENV_PROFILE, &["settings", "profile"]),
    (ENV_TIMEZONE, &["settings", "timezone"]),
    (ENV_CONVERSATIONS, &["settings", "path", "documentation", "conversations"]),
    (ENV_DIARY, &["settings", "path", "documentation", "diary"]),
    (ENV_OUTPUT, &["build", "output", "profiles"]),
];

/// Apply overrides using `lookup` to read variables.
///
/// Empty values are ignored. Intermediate mappings are created as needed;
/// a non-mapping in the way is replaced.
pub fn apply_overrides(config: &mut Value, lookup: impl Fn(&str) -> Option<String>) {
    for (variable, path) in OVERRIDES {
        if let Some(value) = lookup(variable).filter(|v| !v.is_empty()) {
            debug!("Overriding {} from {variable}", path.join("."));
            set_path(config, path, Value::String(value));
        }
    }
}

fn set_path(root: &mut Value, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for key in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        current = map.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
    }
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
}
