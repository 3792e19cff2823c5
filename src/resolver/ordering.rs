//! Deterministic emission order for a closure.
//!
//! The orderer runs a depth-first post-order traversal over the closure in
//! its iteration order, visiting each node's `inherits` targets before the
//! node itself. That yields ancestors before dependents; reversing it gives
//! the presentation order: the requested root first, foundations last.
//!
//! Resolver-built closures are acyclic, but [`DependencyOrderer::order`] is
//! public, so it tracks in-progress nodes and reports a cycle instead of
//! looping if handed a cyclic closure from elsewhere.

use std::collections::HashMap;

use super::closure::{Closure, OrderedClosure};
use crate::core::{BuilderError, NodeName};

/// Visit states for the depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node is on the current traversal path.
    Gray,
    /// Node and all its ancestors are emitted.
    Black,
}

/// Computes the presentation order of a closure.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyOrderer;

impl DependencyOrderer {
    /// Create an orderer.
    pub fn new() -> Self {
        Self
    }

    /// Order `closure` so every node precedes each ancestor it inherits.
    ///
    /// Inherited names missing from the closure are skipped. Every member
    /// appears exactly once.
    pub fn order(&self, closure: &Closure) -> Result<OrderedClosure, BuilderError> {
        let mut colors: HashMap<&NodeName, Color> = HashMap::with_capacity(closure.len());
        let mut path: Vec<&NodeName> = Vec::new();
        let mut post_order: Vec<&NodeName> = Vec::with_capacity(closure.len());

        for name in closure.names() {
            Self::visit(closure, name, &mut colors, &mut path, &mut post_order)?;
        }

        let entries = post_order
            .into_iter()
            .rev()
            .filter_map(|name| closure.get(name).map(|node| (name.clone(), node.clone())))
            .collect();
        Ok(OrderedClosure::from_entries(entries))
    }

    fn visit<'a>(
        closure: &'a Closure,
        name: &'a NodeName,
        colors: &mut HashMap<&'a NodeName, Color>,
        path: &mut Vec<&'a NodeName>,
        post_order: &mut Vec<&'a NodeName>,
    ) -> Result<(), BuilderError> {
        match colors.get(name) {
            Some(Color::Black) => return Ok(()),
            Some(Color::Gray) => {
                let start = path.iter().position(|n| *n == name).unwrap_or(0);
                let chain = path[start..]
                    .iter()
                    .chain(std::iter::once(&name))
                    .map(|n| n.as_str())
                    .collect::<Vec<_>>()
                    .join(" → ");
                return Err(BuilderError::CircularDependency {
                    chain,
                });
            }
            None => {}
        }

        colors.insert(name, Color::Gray);
        path.push(name);

        if let Some(node) = closure.get(name) {
            for parent in &node.inherits {
                if closure.contains(parent) {
                    Self::visit(closure, parent, colors, path, post_order)?;
                }
            }
        }

        path.pop();
        colors.insert(name, Color::Black);
        post_order.push(name);
        Ok(())
    }
}
