//! Artifact envelopes and the build status document.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::timestamp::Timestamp;
use crate::constants::{INSTRUCTIONS_KEY, PROFILES_KEY};
use crate::resolver::OrderedClosure;

/// Which closure an artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Profiles,
    Instructions,
}

impl ArtifactKind {
    /// Wrapper key in the serialized envelope.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Profiles => PROFILES_KEY,
            Self::Instructions => INSTRUCTIONS_KEY,
        }
    }
}

/// `{ "<key>": <ordered closure>, "version": "<version>" }`
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub kind: ArtifactKind,
    pub closure: &'a OrderedClosure,
    pub version: &'a str,
}

impl<'a> Artifact<'a> {
    pub fn new(kind: ArtifactKind, closure: &'a OrderedClosure, version: &'a str) -> Self {
        Self {
            kind,
            closure,
            version,
        }
    }
}

impl Serialize for Artifact<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.key(), self.closure)?;
        map.serialize_entry("version", self.version)?;
        map.end()
    }
}

/// Printed to stdout after a build, and by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDocument {
    /// Files written by the build, sorted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    pub profile: String,
    pub timestamp: Timestamp,
}

impl StatusDocument {
    /// Metadata-only document.
    pub fn metadata(profile: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            paths: None,
            profile: profile.into(),
            timestamp,
        }
    }

    /// Attach the written paths; an empty list is omitted.
    pub fn with_paths(mut self, mut paths: Vec<String>) -> Self {
        paths.sort();
        self.paths = (!paths.is_empty()).then_some(paths);
        self
    }
}
