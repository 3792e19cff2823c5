//! Test utilities for the memory builder
//!
//! Fixtures that lay out a configuration file and definition trees in a
//! temporary directory, plus one-time logging setup for tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use memory_builder::builder::MemoryBuilder;
//! use memory_builder::test_utils::BuilderFixture;
//!
//! # fn example() -> anyhow::Result<()> {
//! let fixture = BuilderFixture::standard()?.with_file_outputs()?;
//! let config = fixture.load_config()?;
//! MemoryBuilder::new(&config).build(None, false)?;
//! assert!(fixture.root().join("out/memory.json").exists());
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::BuilderFixture;
pub use fixtures::DefinitionFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with
/// neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
