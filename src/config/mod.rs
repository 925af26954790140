//! Configuration management for grailx
//!
//! Handles the per-project layout: the base manifest, the `.grail/`
//! directory holding config.json, and the `plugins/` directory.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{GrailError, Result};

/// File name of the base project manifest
pub const MANIFEST_FILE: &str = "grail.manifest.json";

/// Hidden per-project directory
pub const CONFIG_DIR: &str = ".grail";

/// Registry document inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.json";

/// Directory holding plugin manifests
pub const PLUGINS_DIR: &str = "plugins";

/// Suffix every manifest file carries (compared case-insensitively)
pub const MANIFEST_SUFFIX: &str = ".json";

/// Persisted registry document (`.grail/config.json`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PluginConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugins: Vec<String>,
}

/// Treats an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns paths to every fixed location of a grailx project
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub config_dir: PathBuf,
    pub config: PathBuf,
    pub plugins: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            manifest: root.join(MANIFEST_FILE),
            config_dir: root.join(CONFIG_DIR),
            config: root.join(CONFIG_DIR).join(CONFIG_FILE),
            plugins: root.join(PLUGINS_DIR),
            root,
        }
    }

    /// Paths rooted at the process working directory
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| GrailError::io(".", e))?;
        Ok(Self::new(cwd))
    }

    /// Create the config directory if it doesn't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).map_err(|e| GrailError::io(&self.config_dir, e))
    }
}

/// True if `name` ends with the manifest suffix, ignoring case
pub fn has_manifest_suffix(name: &str) -> bool {
    name.to_lowercase().ends_with(MANIFEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted() {
        let paths = ProjectPaths::new("/work/project");
        assert_eq!(paths.manifest, PathBuf::from("/work/project/grail.manifest.json"));
        assert_eq!(paths.config, PathBuf::from("/work/project/.grail/config.json"));
        assert_eq!(paths.plugins, PathBuf::from("/work/project/plugins"));
    }

    #[test]
    fn test_suffix_is_case_insensitive() {
        assert!(has_manifest_suffix("web.json"));
        assert!(has_manifest_suffix("WEB.JSON"));
        assert!(!has_manifest_suffix("web.jsonc"));
        assert!(!has_manifest_suffix("json"));
    }

    #[test]
    fn test_plugin_config_null_plugins() {
        let cfg: PluginConfig = serde_json::from_str(r#"{"plugins": null}"#).unwrap();
        assert!(cfg.plugins.is_empty());

        let cfg: PluginConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.plugins.is_empty());
    }
}
