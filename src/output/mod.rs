//! Artifact output.
//!
//! - [`Artifact`] wraps an ordered closure with the configured version
//! - [`ArtifactWriter`] writes documents to a [`Destination`]
//! - [`inject_into_skill`] embeds artifacts into a SKILL.md file
//! - [`StatusDocument`] and [`Timestamp`] describe a finished build
//!
//! Artifacts never carry a timestamp, so building twice from the same
//! definitions produces byte-identical files.

mod artifact;
pub mod inject;
mod timestamp;
mod writer;

pub use artifact::{Artifact, ArtifactKind, StatusDocument};
pub use inject::{inject_block, inject_into_skill};
pub use timestamp::{Timestamp, Timezone};
pub use writer::{ArtifactWriter, Destination};
