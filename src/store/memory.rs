//! In-memory content store.

use serde_json::Value;
use std::collections::HashMap;

use super::ContentStore;
use crate::core::{BuilderError, NodeName};

/// Definitions held in a map keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    definitions: HashMap<NodeName, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a full definition document (`{ NAME: { description, ... } }`).
    pub fn insert(&mut self, name: impl AsRef<str>, document: Value) {
        self.definitions.insert(NodeName::new(name), document);
    }

    /// Builder-style variant of [`MemoryStore::insert`].
    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, document: Value) -> Self {
        self.insert(name, document);
        self
    }

    /// Add a definition whose document is `{ NAME: { description, relations: [inherits...] } }`.
    #[must_use]
    pub fn with_node(self, name: &str, description: &str, inherits: &[&str]) -> Self {
        let relations: Vec<Value> = inherits
            .iter()
            .map(|target| serde_json::json!({ "type": "inherits", "target": target }))
            .collect();
        let mut body = serde_json::Map::new();
        body.insert("description".to_string(), Value::String(description.to_string()));
        if !relations.is_empty() {
            body.insert("relations".to_string(), Value::Array(relations));
        }
        let mut document = serde_json::Map::new();
        document.insert(NodeName::new(name).to_string(), Value::Object(body));
        self.with(name, Value::Object(document))
    }
}

impl ContentStore for MemoryStore {
    fn lookup(&self, name: &NodeName) -> Result<Option<Value>, BuilderError> {
        Ok(self.definitions.get(name).cloned())
    }
}
