//! File-backed content store with domain-then-common lookup.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ContentStore;
use crate::config::ContentPaths;
use crate::constants::DEFINITION_EXTENSIONS;
use crate::core::{BuilderError, NodeName};

/// Loads `<name-lowercase>.yaml` definitions from two directories.
///
/// The domain directory is searched first so a domain can shadow any common
/// definition of the same name.
#[derive(Debug, Clone)]
pub struct FileContentStore {
    domain: PathBuf,
    common: PathBuf,
}

impl FileContentStore {
    /// Create a store over a domain directory and a common fallback.
    pub fn new(domain: impl Into<PathBuf>, common: impl Into<PathBuf>) -> Self {
        Self {
            domain: domain.into(),
            common: common.into(),
        }
    }

    /// Create a store from configured content paths.
    pub fn from_paths(paths: &ContentPaths) -> Self {
        Self::new(&paths.domain, &paths.common)
    }

    /// Find the definition file for `name`, if any.
    pub fn locate(&self, name: &NodeName) -> Option<PathBuf> {
        let stem = name.file_stem();
        [&self.domain, &self.common].into_iter().find_map(|dir| {
            DEFINITION_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{stem}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }

    fn read(path: &Path) -> Result<Value, BuilderError> {
        let read_error = |reason: String| BuilderError::NodeReadError {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| read_error(e.to_string()))
    }
}

impl ContentStore for FileContentStore {
    fn lookup(&self, name: &NodeName) -> Result<Option<Value>, BuilderError> {
        let Some(path) = self.locate(name) else {
            debug!(
                "No definition for {name} in {} or {}",
                self.domain.display(),
                self.common.display()
            );
            return Ok(None);
        };
        debug!("Loading {name} from {}", path.display());
        Self::read(&path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileContentStore) {
        let temp = TempDir::new().unwrap();
        let domain = temp.path().join("domain");
        let common = temp.path().join("common");
        fs::create_dir_all(&domain).unwrap();
        fs::create_dir_all(&common).unwrap();
        let store = FileContentStore::new(&domain, &common);
        (temp, store)
    }

    #[test]
    fn test_domain_shadows_common() {
        let (temp, store) = setup();
        fs::write(temp.path().join("domain/developer.yaml"), "DEVELOPER:\n  description: domain\n")
            .unwrap();
        fs::write(temp.path().join("common/developer.yaml"), "DEVELOPER:\n  description: common\n")
            .unwrap();

        let doc = store.lookup(&NodeName::new("Developer")).unwrap().unwrap();
        assert_eq!(doc, json!({"DEVELOPER": {"description": "domain"}}));
    }

    #[test]
    fn test_falls_back_to_common_and_yml() {
        let (temp, store) = setup();
        fs::write(temp.path().join("common/common.yml"), "COMMON:\n  description: shared\n").unwrap();

        let doc = store.lookup(&NodeName::new("COMMON")).unwrap().unwrap();
        assert_eq!(doc["COMMON"]["description"], "shared");
    }

    #[test]
    fn test_missing_definition_is_none() {
        let (_temp, store) = setup();
        assert!(store.lookup(&NodeName::new("GHOST")).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_definition_is_read_error() {
        let (temp, store) = setup();
        fs::write(temp.path().join("domain/broken.yaml"), "BROKEN: [unclosed\n").unwrap();

        let err = store.lookup(&NodeName::new("BROKEN")).unwrap_err();
        assert!(matches!(err, BuilderError::NodeReadError { .. }));
    }
}
