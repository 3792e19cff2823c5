//! memory-builder
//!
//! Compiles inheritable profile and instruction definitions into ordered
//! JSON artifacts.
//!
//! # Architecture Overview
//!
//! Definitions are YAML documents, one node per file, looked up first in a
//! domain directory and then in a common one. A node may `inherit` other
//! nodes. Building a profile means:
//!
//! 1. Resolving the closure of the requested root through `inherits`
//!    relations, substituting `{{settings.*}}` placeholders in every section
//! 2. Ordering the closure so each node precedes the nodes it inherits
//! 3. Wrapping it as `{ "profiles": {...}, "version": "..." }` and writing it
//!    to a file or stdout
//!
//! Instructions go through the same pipeline with a `CONTAINER` or `LOCAL`
//! root.
//!
//! # Core Modules
//!
//! - [`core`] - Node names, definitions, and error types
//! - [`config`] - Builder configuration loading and validation
//! - [`store`] - Where definitions come from
//! - [`templating`] - Placeholder substitution
//! - [`resolver`] - Closure resolution and dependency ordering
//! - [`output`] - Artifact envelopes, writers, and SKILL.md injection
//! - [`builder`] - End-to-end orchestration
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`constants`] - Reserved keys, file names, and environment variables
//! - [`utils`] - Durable writes and path expansion
//!
//! # Definition Format
//!
//! ```yaml
//! DEVELOPER:
//!   description: Developer profile
//!   relations:
//!     - type: inherits
//!       target: ENGINEER
//!   practices:
//!     - Review with {{settings.plugin.framework.name}}
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use memory_builder::builder::MemoryBuilder;
//! use memory_builder::config::BuilderConfig;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = BuilderConfig::load(Path::new("builder.yaml"))?;
//! let builder = MemoryBuilder::new(&config);
//! let compiled = builder.compile(Some("DEVELOPER"), false)?;
//! println!("{} profiles", compiled.profiles.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod output;
pub mod resolver;
pub mod store;
pub mod templating;
pub mod utils;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
