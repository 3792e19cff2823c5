//! Integration test suite for memory-builder
//!
//! End-to-end tests that lay out real configuration and definition files in
//! a temporary directory and run the builder against them.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: Library-level builds, ordering, substitution, SKILL.md injection
//! - **cli**: The `memory-builder` binary via `assert_cmd`
//! - **errors**: Cycles, missing nodes, invalid relations, bad configuration

mod build;
mod cli;
mod errors;
