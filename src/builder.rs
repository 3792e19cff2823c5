//! Build orchestration.
//!
//! [`MemoryBuilder`] ties the pieces together for one configuration:
//!
//! 1. Resolve and order the profile closure for the requested profile
//! 2. Resolve and order the instructions closure (`CONTAINER` or `LOCAL`)
//! 3. Write both artifacts to their destinations
//! 4. Inject both artifacts into SKILL.md when configured
//! 5. Print the status document
//!
//! Profiles and instructions are resolved independently; each gets its own
//! store, resolution state, and closure.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::{BuilderConfig, ContentPaths};
use crate::constants::{
    CONTAINER_INSTRUCTIONS, INSTRUCTIONS_MARKER, LOCAL_INSTRUCTIONS, METHODOLOGY_MARKER,
};
use crate::core::{BuilderError, NodeName};
use crate::output::{
    Artifact, ArtifactKind, ArtifactWriter, Destination, StatusDocument, Timestamp,
    inject_into_skill,
};
use crate::resolver::{DependencyOrderer, InheritanceResolver, OrderedClosure};
use crate::store::FileContentStore;
use crate::templating::Substitutor;

/// Both ordered closures produced for one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMemory {
    /// Canonical root profile
    pub profile: NodeName,
    pub profiles: OrderedClosure,
    /// Canonical instructions root (`CONTAINER` or `LOCAL`)
    pub instructions_root: NodeName,
    pub instructions: OrderedClosure,
}

/// Compiles profiles and instructions for a loaded configuration.
#[derive(Debug)]
pub struct MemoryBuilder<'a> {
    config: &'a BuilderConfig,
    substitutor: Substitutor,
    writer: ArtifactWriter,
}

impl<'a> MemoryBuilder<'a> {
    pub fn new(config: &'a BuilderConfig) -> Self {
        let substitutor = Substitutor::new(Some(config.settings.values()));
        debug!("Registered {} placeholders", substitutor.placeholders().len());
        Self {
            config,
            substitutor,
            writer: ArtifactWriter::new(),
        }
    }

    /// The profile used when none is requested.
    pub fn default_profile(&self) -> NodeName {
        NodeName::new(&self.config.settings.profile)
    }

    /// Resolve and order the closure rooted at `root` from `paths`.
    pub fn resolve(&self, paths: &ContentPaths, root: &NodeName) -> Result<OrderedClosure, BuilderError> {
        let store = FileContentStore::from_paths(paths);
        let resolver =
            InheritanceResolver::new(&store, &self.substitutor, &self.config.settings.relations);
        let closure = resolver.resolve(root)?;
        DependencyOrderer::new().order(&closure)
    }

    /// Resolve both closures without writing anything.
    pub fn compile(&self, profile: Option<&str>, container: bool) -> Result<CompiledMemory> {
        let profile = profile.map_or_else(|| self.default_profile(), NodeName::new);
        let instructions_root =
            NodeName::new(if container { CONTAINER_INSTRUCTIONS } else { LOCAL_INSTRUCTIONS });

        let profiles = self
            .resolve(&self.config.build.profiles, &profile)
            .with_context(|| format!("Failed to resolve profile {profile}"))?;
        let instructions = self
            .resolve(&self.config.build.instructions, &instructions_root)
            .with_context(|| format!("Failed to resolve instructions {instructions_root}"))?;

        info!(
            "Compiled {} profile(s) and {} instruction set(s) for {profile}",
            profiles.len(),
            instructions.len()
        );
        Ok(CompiledMemory {
            profile,
            profiles,
            instructions_root,
            instructions,
        })
    }

    /// Check that both closures resolve for `profile`.
    pub fn validate(&self, profile: Option<&str>, container: bool) -> Result<CompiledMemory> {
        self.compile(profile, container)
    }

    /// Build and print the status document to stdout.
    pub fn build(&self, profile: Option<&str>, container: bool) -> Result<StatusDocument> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.build_to(profile, container, &mut lock)
    }

    /// Build, sending console output to `console`.
    pub fn build_to<W: Write>(
        &self,
        profile: Option<&str>,
        container: bool,
        console: &mut W,
    ) -> Result<StatusDocument> {
        let compiled = self.compile(profile, container)?;
        let version = self.config.settings.version.as_str();
        let output = &self.config.build.output;

        let instructions = Artifact::new(ArtifactKind::Instructions, &compiled.instructions, version);
        let profiles = Artifact::new(ArtifactKind::Profiles, &compiled.profiles, version);

        let mut paths = Vec::new();
        for (artifact, destination) in
            [(&instructions, &output.instructions), (&profiles, &output.profiles)]
        {
            self.writer
                .write_with(artifact, destination, console)
                .with_context(|| format!("Failed to write {} artifact", artifact.kind.key()))?;
            if let Destination::File(path) = destination {
                paths.push(display_path(path));
            }
        }

        if let Some(skill) = &output.skill {
            let blocks = [
                (INSTRUCTIONS_MARKER, serde_json::to_string(&instructions)?),
                (METHODOLOGY_MARKER, serde_json::to_string(&profiles)?),
            ];
            inject_into_skill(skill, &blocks)
                .with_context(|| format!("Failed to update {}", skill.display()))?;
            paths.push(display_path(skill));
        }

        let status = StatusDocument::metadata(compiled.profile.as_str(), self.timestamp())
            .with_paths(paths);
        self.writer.write_with(&status, &Destination::Stdout, console)?;
        Ok(status)
    }

    /// Print the metadata-only status document to stdout.
    pub fn status(&self) -> Result<StatusDocument> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.status_to(&mut lock)
    }

    pub fn status_to<W: Write>(&self, console: &mut W) -> Result<StatusDocument> {
        let status = StatusDocument::metadata(self.default_profile().as_str(), self.timestamp());
        self.writer.write_with(&status, &Destination::Stdout, console)?;
        Ok(status)
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::now(self.config.settings.timezone)
    }
}

fn display_path(path: &std::path::Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
