//! Core types for the memory builder
//!
//! This module holds the foundation shared by every other module:
//!
//! - [`error`] - [`BuilderError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`node`] - [`NodeName`], [`Relation`], [`NodeDefinition`] and [`AssembledNode`]
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use memory_builder::core::{BuilderError, NodeName};
//!
//! fn find(name: &NodeName) -> Result<(), BuilderError> {
//!     Err(BuilderError::NodeNotFound {
//!         name: name.to_string(),
//!     })
//! }
//!
//! let err = find(&NodeName::new("ghost")).unwrap_err();
//! assert_eq!(err.to_string(), "Node not found: GHOST");
//! ```

pub mod error;
pub mod node;

pub use error::{BuilderError, ErrorContext, user_friendly_error};
pub use node::{AssembledNode, NodeDefinition, NodeName, Relation};
