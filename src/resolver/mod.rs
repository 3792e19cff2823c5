//! Inheritance resolution for profile and instruction definitions.
//!
//! Given a root node and a [`ContentStore`], the resolver builds the full
//! dependency [`Closure`]: the root plus every node reachable through
//! `inherits` relations, each assembled with placeholders substituted.
//! [`DependencyOrderer`] then arranges the closure for output.
//!
//! # Algorithm
//!
//! Depth-first and memoized, with an explicit resolution stack:
//!
//! 1. A node already resolved in this invocation returns immediately, so a
//!    node reachable through several paths is resolved once.
//! 2. A node already on the stack is a cycle; the error reports the cycle
//!    path, e.g. `A → B → A`.
//! 3. The definition is loaded; a missing one fails with `NodeNotFound`.
//! 4. Every declared relation type is checked against the allow-list, not
//!    only `inherits`.
//! 5. Each `inherits` target is resolved before the current node is added,
//!    so ancestors are always in the closure first.
//! 6. The node is assembled (description verbatim, sections substituted,
//!    `inherits` attached only when non-empty) and recorded.
//!
//! Any failure aborts the whole resolution; no partial closure is returned.
//! The stack and done set live only for one [`InheritanceResolver::resolve`]
//! call.
//!
//! # Example
//!
//! ```rust
//! use memory_builder::core::NodeName;
//! use memory_builder::resolver::{DependencyOrderer, InheritanceResolver};
//! use memory_builder::store::MemoryStore;
//! use memory_builder::templating::Substitutor;
//!
//! let store = MemoryStore::new()
//!     .with_node("DEVELOPER", "Developer", &["ENGINEER"])
//!     .with_node("ENGINEER", "Engineer", &["COMMON"])
//!     .with_node("COMMON", "Common", &[]);
//! let substitutor = Substitutor::default();
//! let allowed = vec!["inherits".to_string()];
//!
//! let resolver = InheritanceResolver::new(&store, &substitutor, &allowed);
//! let closure = resolver.resolve(&NodeName::new("developer")).unwrap();
//! assert_eq!(closure.len(), 3);
//!
//! let ordered = DependencyOrderer::new().order(&closure).unwrap();
//! let names: Vec<_> = ordered.names().into_iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, vec!["DEVELOPER", "ENGINEER", "COMMON"]);
//! ```

pub mod closure;
pub mod ordering;

pub use closure::{Closure, OrderedClosure};
pub use ordering::DependencyOrderer;

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::constants::INHERITS_RELATION;
use crate::core::{AssembledNode, BuilderError, NodeDefinition, NodeName};
use crate::store::ContentStore;
use crate::templating::Substitutor;

/// Builds dependency closures from a content store.
pub struct InheritanceResolver<'a, S: ContentStore> {
    store: S,
    substitutor: &'a Substitutor,
    allowed_relations: &'a [String],
}

/// Per-invocation resolution state.
#[derive(Default)]
struct ResolutionState {
    stack: Vec<NodeName>,
    done: HashSet<NodeName>,
    closure: Closure,
}

impl<'a, S: ContentStore> InheritanceResolver<'a, S> {
    /// Create a resolver over `store`.
    ///
    /// `allowed_relations` is the legal set of relation type tags; it should
    /// contain `inherits` for inheritance to be usable.
    pub fn new(store: S, substitutor: &'a Substitutor, allowed_relations: &'a [String]) -> Self {
        Self {
            store,
            substitutor,
            allowed_relations,
        }
    }

    /// Resolve the closure of `root`.
    pub fn resolve(&self, root: &NodeName) -> Result<Closure, BuilderError> {
        let mut state = ResolutionState::default();
        self.resolve_node(root, &mut state)?;
        debug!("Resolved {root} with {} node(s)", state.closure.len());
        Ok(state.closure)
    }

    fn resolve_node(&self, name: &NodeName, state: &mut ResolutionState) -> Result<(), BuilderError> {
        if state.done.contains(name) {
            return Ok(());
        }
        if let Some(start) = state.stack.iter().position(|n| n == name) {
            let chain = state.stack[start..]
                .iter()
                .chain(std::iter::once(name))
                .map(NodeName::as_str)
                .collect::<Vec<_>>()
                .join(" → ");
            return Err(BuilderError::CircularDependency {
                chain,
            });
        }

        state.stack.push(name.clone());

        let document = self.store.lookup(name)?.ok_or_else(|| BuilderError::NodeNotFound {
            name: name.to_string(),
        })?;
        let definition = NodeDefinition::from_document(name, document)?;
        if NodeName::new(&definition.declared_name) != *name {
            warn!("Definition for {name} declares key '{}'; using {name}", definition.declared_name);
        }

        self.validate_relations(name, &definition)?;

        let inherits = definition.inherits();
        for parent in &inherits {
            self.resolve_node(parent, state)?;
        }

        let mut sections = self.substitutor.substitute_sections(definition.sections);
        // The relation-derived list owns the `inherits` key in the output.
        if !inherits.is_empty() && sections.remove(INHERITS_RELATION).is_some() {
            debug!("Replacing authored 'inherits' section of {name} with its relations");
        }

        let node = AssembledNode {
            description: definition.description,
            sections,
            inherits,
        };
        debug!("Assembled {name}");
        state.closure.insert(name.clone(), node);
        state.done.insert(name.clone());
        state.stack.pop();
        Ok(())
    }

    fn validate_relations(
        &self,
        name: &NodeName,
        definition: &NodeDefinition,
    ) -> Result<(), BuilderError> {
        for relation in &definition.relations {
            if let Some(relation_type) = &relation.relation_type
                && !self.allowed_relations.iter().any(|allowed| allowed == relation_type)
            {
                return Err(BuilderError::InvalidRelationType {
                    relation_type: relation_type.clone(),
                    node: name.to_string(),
                    allowed: self.allowed_relations.to_vec(),
                });
            }
            if relation.is_inherits() && relation.target.is_none() {
                return Err(BuilderError::InvalidNodeDefinition {
                    name: name.to_string(),
                    reason: "'inherits' relation without a target".to_string(),
                });
            }
        }
        Ok(())
    }
}
