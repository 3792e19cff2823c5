//! Closure and ordered closure containers.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::core::{AssembledNode, BuilderError, NodeName};

/// Every node reachable from a root via `inherits`, keyed by canonical name.
///
/// Iteration follows insertion order, which for a resolver-built closure is
/// the order nodes finished resolving (ancestors before dependents). That
/// order is fixed for a given set of definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Closure {
    nodes: HashMap<NodeName, AssembledNode>,
    insertion_order: Vec<NodeName>,
}

impl Closure {
    /// Create an empty closure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, keeping its first insertion position on replacement.
    pub fn insert(&mut self, name: NodeName, node: AssembledNode) {
        if self.nodes.insert(name.clone(), node).is_none() {
            self.insertion_order.push(name);
        }
    }

    /// Look up a node.
    pub fn get(&self, name: &NodeName) -> Option<&AssembledNode> {
        self.nodes.get(name)
    }

    /// Whether `name` is a member.
    pub fn contains(&self, name: &NodeName) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the closure has no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Member names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &NodeName> {
        self.insertion_order.iter()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeName, &AssembledNode)> {
        self.insertion_order.iter().filter_map(|name| self.nodes.get(name).map(|node| (name, node)))
    }

    /// Build a closure from an untyped payload such as a previously written artifact body.
    ///
    /// This is the entry point for callers holding JSON rather than a
    /// resolved closure; the result can be handed to
    /// [`DependencyOrderer`](super::DependencyOrderer) like any other.
    ///
    /// `what` names the payload in errors (e.g. `"Profiles"`). The payload
    /// must be an object of objects, each with a string `description`.
    pub fn from_value(what: &str, value: Value) -> Result<Self, BuilderError> {
        let shape_error = || BuilderError::InvalidInputShape {
            what: what.to_string(),
        };
        let Value::Object(entries) = value else {
            return Err(shape_error());
        };

        let mut closure = Self::new();
        for (name, entry) in entries {
            let Value::Object(mut body) = entry else {
                return Err(shape_error());
            };
            let Some(Value::String(description)) = body.remove("description") else {
                return Err(shape_error());
            };
            let inherits = match body.remove("inherits") {
                None => Vec::new(),
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| item.as_str().map(NodeName::new).ok_or_else(shape_error))
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => return Err(shape_error()),
            };
            closure.insert(
                NodeName::new(&name),
                AssembledNode {
                    description,
                    sections: body,
                    inherits,
                },
            );
        }
        Ok(closure)
    }
}

/// Closure entries arranged so every node precedes the ancestors it inherits.
///
/// Serializes as a JSON object whose key order is the sequence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedClosure {
    entries: Vec<(NodeName, AssembledNode)>,
}

impl OrderedClosure {
    pub(crate) fn from_entries(entries: Vec<(NodeName, AssembledNode)>) -> Self {
        Self {
            entries,
        }
    }

    /// Names in output order.
    pub fn names(&self) -> Vec<&NodeName> {
        self.entries.iter().map(|(name, _)| name).collect()
    }

    /// Entries in output order.
    pub fn entries(&self) -> &[(NodeName, AssembledNode)] {
        &self.entries
    }

    /// Position of `name` in the output order.
    pub fn position(&self, name: &NodeName) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OrderedClosure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in &self.entries {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}
