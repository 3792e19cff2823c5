//! Placeholder substitution for node content.
//!
//! Content authors reference configuration values with Mustache-style
//! placeholders such as `{{settings.path.tool}}`. A [`Substitutor`] is built
//! once per build from the `settings` tree and applied to every string leaf
//! of every node.
//!
//! Substitution is literal replacement of every occurrence of every known
//! placeholder. Unknown placeholders are left verbatim. Placeholders are
//! expected not to be prefixes of one another; this is an authoring rule and
//! is not checked.
//!
//! # Examples
//!
//! ```rust
//! use memory_builder::templating::Substitutor;
//! use serde_json::json;
//!
//! let settings = json!({ "path": { "tool": "/usr/bin/x" } });
//! let substitutor = Substitutor::new(settings.as_object());
//!
//! assert_eq!(
//!     substitutor.substitute("Tool path: {{settings.path.tool}}"),
//!     "Tool path: /usr/bin/x"
//! );
//! assert_eq!(substitutor.substitute("{{settings.unknown}}"), "{{settings.unknown}}");
//! ```

pub mod placeholders;

use serde_json::{Map, Value};

pub use placeholders::{PlaceholderMap, flatten_settings};

/// Applies flattened settings placeholders to text and content trees.
#[derive(Debug, Clone, Default)]
pub struct Substitutor {
    placeholders: PlaceholderMap,
}

impl Substitutor {
    /// Build a substitutor from an optional settings object.
    ///
    /// With `None` every substitution is a no-op.
    pub fn new(settings: Option<&Map<String, Value>>) -> Self {
        Self {
            placeholders: settings.map(flatten_settings).unwrap_or_default(),
        }
    }

    /// The registered placeholders.
    pub fn placeholders(&self) -> &PlaceholderMap {
        &self.placeholders
    }

    /// Replace every known placeholder in `text`.
    pub fn substitute(&self, text: &str) -> String {
        if !text.contains("{{") {
            return text.to_string();
        }
        let mut result = text.to_string();
        for (placeholder, value) in &self.placeholders {
            if result.contains(placeholder.as_str()) {
                result = result.replace(placeholder.as_str(), value);
            }
        }
        result
    }

    /// Walk a content value, substituting string leaves.
    ///
    /// Objects recurse. Arrays substitute their string elements and pass any
    /// other element through untouched. Non-string scalars pass through.
    pub fn substitute_value(&self, value: Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.substitute(&text)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(text) => Value::String(self.substitute(&text)),
                        other => other,
                    })
                    .collect(),
            ),
            Value::Object(object) => Value::Object(self.substitute_sections(object)),
            scalar => scalar,
        }
    }

    /// Substitute every value of a section mapping.
    pub fn substitute_sections(&self, sections: Map<String, Value>) -> Map<String, Value> {
        sections.into_iter().map(|(key, value)| (key, self.substitute_value(value))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn substitutor(settings: Value) -> Substitutor {
        Substitutor::new(settings.as_object())
    }

    #[test]
    fn test_substitute_known_placeholder() {
        let s = substitutor(json!({ "path": { "tool": "/usr/bin/x" } }));
        assert_eq!(s.substitute("Tool path: {{settings.path.tool}}"), "Tool path: /usr/bin/x");
    }

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let s = substitutor(json!({ "name": "dev" }));
        assert_eq!(s.substitute("{{settings.name}}/{{settings.name}}"), "dev/dev");
    }

    #[test]
    fn test_unknown_placeholders_pass_through() {
        let s = substitutor(json!({ "name": "dev" }));
        assert_eq!(s.substitute("{{settings.other}} {{name}}"), "{{settings.other}} {{name}}");
    }

    #[test]
    fn test_no_settings_is_noop() {
        let s = Substitutor::new(None);
        assert!(s.placeholders().is_empty());
        assert_eq!(s.substitute("{{settings.path.tool}}"), "{{settings.path.tool}}");
    }

    #[test]
    fn test_known_placeholders_fully_consumed() {
        let s = substitutor(json!({ "a": "1", "b": { "c": "2" }, "plugins": {
            "core": [{ "plugin": { "name": "fw", "version": "3" }, "skills": { "init": "fw-init" } }]
        }}));
        let text = s.placeholders().keys().cloned().collect::<Vec<_>>().join(" ");
        let out = s.substitute(&text);
        for placeholder in s.placeholders().keys() {
            assert!(!out.contains(placeholder.as_str()), "{placeholder} survived in {out}");
        }
    }

    #[test]
    fn test_substitute_value_walks_content() {
        let s = substitutor(json!({ "tool": "x" }));
        let content = json!({
            "text": "use {{settings.tool}}",
            "list": ["{{settings.tool}}", 7, { "nested": "{{settings.tool}}" }],
            "deep": { "deeper": { "leaf": "{{settings.tool}}!" } },
            "count": 4,
            "flag": true,
            "none": null
        });

        let out = s.substitute_value(content);
        assert_eq!(
            out,
            json!({
                "text": "use x",
                "list": ["x", 7, { "nested": "{{settings.tool}}" }],
                "deep": { "deeper": { "leaf": "x!" } },
                "count": 4,
                "flag": true,
                "none": null
            })
        );
    }
}
