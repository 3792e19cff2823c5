//! Flattening of a nested settings tree into `{{settings.*}}` placeholders.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::constants::{PLUGINS_KEY, SETTINGS_PREFIX};

/// Flat mapping from placeholder text (`{{settings.path.tool}}`) to its value.
///
/// A `BTreeMap` keeps substitution order fixed between runs.
pub type PlaceholderMap = BTreeMap<String, String>;

/// Flatten a settings object into placeholders rooted at `settings`.
///
/// Objects recurse with an extended dot path. Arrays, `null` and scalars are
/// leaves. A `plugins` mapping is not flattened by path; it registers the
/// short aliases produced by [`register_plugin_aliases`] instead.
pub fn flatten_settings(settings: &Map<String, Value>) -> PlaceholderMap {
    let mut result = PlaceholderMap::new();
    flatten_into(settings, SETTINGS_PREFIX, &mut result);
    result
}

fn flatten_into(object: &Map<String, Value>, prefix: &str, result: &mut PlaceholderMap) {
    for (key, value) in object {
        let path = format!("{prefix}.{key}");
        match value {
            Value::Object(plugins) if key == PLUGINS_KEY => {
                register_plugin_aliases(plugins, result);
            }
            Value::Object(nested) => flatten_into(nested, &path, result),
            leaf => {
                result.insert(format!("{{{{{path}}}}}"), stringify_leaf(leaf));
            }
        }
    }
}

/// Register plugin and skill aliases for a `plugins` mapping.
///
/// The expected shape is `{ <category>: [ { plugin: { name, version }, skills: { <key>: <value> } } ] }`.
/// Each entry yields `{{settings.plugin.<name>.name}}`, `{{settings.plugin.<name>.version}}`
/// and one `{{settings.skill.<key>}}` per skill. Entries without a plugin name are skipped.
pub fn register_plugin_aliases(plugins: &Map<String, Value>, result: &mut PlaceholderMap) {
    for (category, entries) in plugins {
        let Some(entries) = entries.as_array() else {
            warn!("Ignoring plugin category '{category}': expected a list");
            continue;
        };

        for entry in entries {
            let plugin = entry.get("plugin");
            let Some(name) = plugin.and_then(|p| p.get("name")).and_then(Value::as_str) else {
                warn!("Ignoring plugin entry without a name in category '{category}'");
                continue;
            };

            result.insert(format!("{{{{settings.plugin.{name}.name}}}}"), name.to_string());
            if let Some(version) = plugin.and_then(|p| p.get("version")) {
                result.insert(
                    format!("{{{{settings.plugin.{name}.version}}}}"),
                    stringify_leaf(version),
                );
            }

            if let Some(skills) = entry.get("skills").and_then(Value::as_object) {
                for (skill_key, skill_value) in skills {
                    result.insert(
                        format!("{{{{settings.skill.{skill_key}}}}}"),
                        stringify_leaf(skill_value),
                    );
                }
            }
        }
    }
}

/// Render a leaf value as replacement text.
///
/// Strings are inserted raw, arrays join their rendered elements with `,`,
/// `null` renders as `null`, and nested objects as compact JSON.
pub fn stringify_leaf(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(stringify_leaf).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
