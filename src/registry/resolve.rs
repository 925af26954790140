//! Maps a registry entry to the manifest file it names

use std::path::{Path, PathBuf};

use crate::config::{has_manifest_suffix, MANIFEST_SUFFIX, PLUGINS_DIR};

/// Resolve a plugin reference against the project root
///
/// Entries ending in the manifest suffix are paths: absolute ones are used
/// as-is, relative ones are joined onto `root`. Anything else is a bare
/// name and maps to `<root>/plugins/<name>.json`. Never fails; a bad
/// reference shows up later as an empty load.
pub fn resolve(root: &Path, entry: &str) -> PathBuf {
    if has_manifest_suffix(entry) {
        let path = Path::new(entry);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        return root.join(path);
    }
    root.join(PLUGINS_DIR)
        .join(format!("{}{}", entry, MANIFEST_SUFFIX))
}
