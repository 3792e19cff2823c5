//! Cross-platform utilities
//!
//! - [`fs`] - Directory creation and durable atomic writes
//! - [`platform`] - Home directory lookup and path expansion
//!
//! # Example
//!
//! ```rust,no_run
//! use memory_builder::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("output/resources"))?;
//! atomic_write(Path::new("output/resources/memory.json"), b"{}")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, ensure_parent_dir, safe_write};
pub use platform::{get_home_dir, is_windows, resolve_path, resolve_relative_to};
