//! Manifest loading
//!
//! A missing or unreadable manifest loads as [`Manifest::default`]; only a
//! document that exists but fails to decode is an error.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::has_manifest_suffix;
use crate::error::{GrailError, Result};
use crate::models::Manifest;

/// Source of manifest documents
pub trait ManifestStore {
    /// Load the manifest at `location`
    fn load(&self, location: &Path) -> Result<Manifest>;

    /// Manifest files under `dir`, in a stable order
    fn discover(&self, dir: &Path) -> Vec<PathBuf>;
}

/// Reads manifests from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestStore;

impl ManifestStore for FsManifestStore {
    fn load(&self, location: &Path) -> Result<Manifest> {
        let content = match fs::read_to_string(location) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %location.display(), error = %e, "manifest not readable, using empty");
                return Ok(Manifest::default());
            }
        };
        serde_json::from_str(&content).map_err(|e| GrailError::decode(location, e))
    }

    fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            // Symlinked manifests count; the link target decides
            .filter(|e| e.path().is_file())
            .filter(|e| has_manifest_suffix(&e.file_name().to_string_lossy()))
            .map(|e| e.into_path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let m = FsManifestStore.load(&temp.path().join("nope.json")).unwrap();
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn test_invalid_document_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"commands": "not a list"}"#).unwrap();
        let err = FsManifestStore.load(&path).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("plugins");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.json"), "{}").unwrap();
        fs::write(dir.join("A.JSON"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("nested/c.json"), "{}").unwrap();

        let found = FsManifestStore.discover(&dir);
        assert_eq!(
            found,
            vec![dir.join("A.JSON"), dir.join("b.json"), dir.join("nested/c.json")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinked_manifests() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("plugins");
        fs::create_dir_all(&dir).unwrap();
        let target = temp.path().join("shared.json");
        fs::write(&target, r#"{"commands":[{"name":"linked"}]}"#).unwrap();
        std::os::unix::fs::symlink(&target, dir.join("linked.json")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.json"), dir.join("dangling.json")).unwrap();

        let found = FsManifestStore.discover(&dir);
        assert_eq!(found, vec![dir.join("linked.json")]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(FsManifestStore.discover(&temp.path().join("plugins")).is_empty());
    }
}
