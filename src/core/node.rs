//! Node model: names, relations, raw definitions and assembled content.
//!
//! A definition document holds a single top-level key (the node name) whose
//! value carries a `description`, an optional `relations` list and any number
//! of content sections:
//!
//! ```yaml
//! DEVELOPER:
//!   description: Software developer profile
//!   relations:
//!     - type: inherits
//!       target: ENGINEER
//!   guidelines:
//!     - Use {{settings.path.tool}} for builds
//! ```
//!
//! Nested content is kept as [`serde_json::Value`], a tagged variant type, so
//! section walking is exhaustively pattern matched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::{DESCRIPTION_KEY, INHERITS_RELATION, RELATIONS_KEY};
use crate::core::BuilderError;

/// Case-insensitive node identifier.
///
/// Stored canonicalized to uppercase, which is the form used for closure keys
/// and `inherits` lists. [`NodeName::file_stem`] gives the lowercase form used
/// for file lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Canonicalize a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_uppercase())
    }

    /// Canonical (uppercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used as a file stem.
    pub fn file_stem(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A typed edge declared by a node.
///
/// `relation_type` is optional because the source format tolerates untyped
/// entries; those are neither validated nor followed. An empty string, `0`,
/// `false` or `null` counts as untyped. Any other non-string tag is kept in
/// its JSON text form so validation can reject it by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relation {
    /// Relation type tag, e.g. `inherits`
    #[serde(rename = "type", default, deserialize_with = "relation_tag")]
    pub relation_type: Option<String>,
    /// Target node name as declared
    #[serde(default)]
    pub target: Option<String>,
}

fn relation_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let tag = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null | Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };
    Ok(tag)
}

impl Relation {
    /// Whether this relation is an inheritance edge.
    pub fn is_inherits(&self) -> bool {
        self.relation_type.as_deref() == Some(INHERITS_RELATION)
    }
}

/// A raw definition as returned by a content store, split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefinition {
    /// Name declared by the document's top-level key
    pub declared_name: String,
    /// Short description, copied verbatim into the assembled node
    pub description: String,
    /// Declared relations, in declaration order
    pub relations: Vec<Relation>,
    /// Everything else at the node's top level
    pub sections: Map<String, Value>,
}

impl NodeDefinition {
    /// Split a parsed definition document into its parts.
    ///
    /// `requested` names the node being loaded and is only used in error messages.
    pub fn from_document(requested: &NodeName, document: Value) -> Result<Self, BuilderError> {
        let invalid = |reason: &str| BuilderError::InvalidNodeDefinition {
            name: requested.to_string(),
            reason: reason.to_string(),
        };

        let Value::Object(top) = document else {
            return Err(invalid("document is not a mapping"));
        };
        if top.len() != 1 {
            return Err(invalid("document must have exactly one top-level key"));
        }
        let Some((declared_name, body)) = top.into_iter().next() else {
            return Err(invalid("document is empty"));
        };
        let Value::Object(mut body) = body else {
            return Err(invalid("node body is not a mapping"));
        };

        let description = match body.remove(DESCRIPTION_KEY) {
            Some(Value::String(text)) => text,
            Some(_) => return Err(invalid("'description' must be a string")),
            None => return Err(invalid("missing 'description'")),
        };

        let relations = match body.remove(RELATIONS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(value @ Value::Array(_)) => serde_json::from_value(value)
                .map_err(|e| invalid(&format!("malformed 'relations': {e}")))?,
            Some(_) => return Err(invalid("'relations' must be a list")),
        };

        Ok(Self {
            declared_name,
            description,
            relations,
            sections: body,
        })
    }

    /// Targets of `inherits` relations, canonicalized, in declaration order.
    ///
    /// Duplicates are preserved as declared.
    pub fn inherits(&self) -> Vec<NodeName> {
        self.relations
            .iter()
            .filter(|r| r.is_inherits())
            .filter_map(|r| r.target.as_deref())
            .map(NodeName::new)
            .collect()
    }
}

/// A node after assembly: the form stored in a closure and serialized.
///
/// `inherits` is omitted from the output when empty; its absence is the
/// "no inherited dependencies" signal used by the orderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledNode {
    /// Description copied verbatim from the definition
    pub description: String,
    /// Content sections after placeholder substitution
    #[serde(flatten)]
    pub sections: Map<String, Value>,
    /// Inherited node names, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<NodeName>,
}
