//! Content stores: where node definitions come from.
//!
//! The resolver only depends on the [`ContentStore`] lookup contract. Path
//! search strategy, file formats and caching are the store's business.
//!
//! # Components
//!
//! - [`ContentStore`] - `(name) -> parsed definition | not found`
//! - [`FileContentStore`] - YAML files in a domain directory with a common fallback
//! - [`MemoryStore`] - definitions held in memory, for embedding and tests
//!
//! Definitions are read fresh on every lookup; nothing is cached across builds.

mod filesystem;
mod memory;

pub use filesystem::FileContentStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::core::{BuilderError, NodeName};

/// Lookup contract used by the resolver.
pub trait ContentStore {
    /// Return the raw definition document for `name`.
    ///
    /// `Ok(None)` means no definition exists. `Err` is reserved for
    /// definitions that exist but cannot be read or parsed.
    fn lookup(&self, name: &NodeName) -> Result<Option<Value>, BuilderError>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn lookup(&self, name: &NodeName) -> Result<Option<Value>, BuilderError> {
        (**self).lookup(name)
    }
}
