//! Plugin registry: the ordered plugin list kept in `.grail/config.json`
//!
//! Mutators are load-modify-save with no locking. Two processes mutating
//! the registry at once race and the last writer wins.

pub mod resolve;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{PluginConfig, ProjectPaths};
use crate::error::{GrailError, Result};

pub use resolve::resolve;

/// Persistence for the ordered, duplicate-free plugin list
pub trait RegistryStore {
    /// Read the plugin list; an absent registry is an empty list
    fn load(&self) -> Result<Vec<String>>;

    /// Replace the persisted plugin list
    fn save(&self, entries: &[String]) -> Result<()>;

    /// Append `entry` unless already registered
    ///
    /// Returns whether the registry changed.
    fn add(&self, entry: &str) -> Result<bool> {
        ensure_entry(entry, "usage: grailx plugins add <name|path>")?;
        let mut entries = self.load()?;
        if entries.iter().any(|e| e == entry) {
            tracing::debug!(entry, "plugin already registered");
            return Ok(false);
        }
        entries.push(entry.to_string());
        self.save(&entries)?;
        tracing::debug!(entry, "plugin registered");
        Ok(true)
    }

    /// Remove every entry equal to `entry`
    ///
    /// Returns whether the registry changed.
    fn remove(&self, entry: &str) -> Result<bool> {
        ensure_entry(entry, "usage: grailx plugins rm <name|path>")?;
        let entries = self.load()?;
        let before = entries.len();
        let kept: Vec<String> = entries.into_iter().filter(|e| e != entry).collect();
        let changed = kept.len() != before;
        self.save(&kept)?;
        tracing::debug!(entry, changed, "plugin removed");
        Ok(changed)
    }
}

fn ensure_entry(entry: &str, usage: &str) -> Result<()> {
    if entry.is_empty() {
        return Err(GrailError::Usage(usage.to_string()));
    }
    Ok(())
}

/// Registry stored as a JSON document on disk
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(paths: &ProjectPaths) -> Self {
        Self {
            path: paths.config.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for FileRegistry {
    fn load(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(GrailError::io(&self.path, e)),
        };
        let config: PluginConfig =
            serde_json::from_str(&content).map_err(|e| GrailError::decode(&self.path, e))?;
        Ok(config.plugins)
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| GrailError::io(dir, e))?;
        }
        let config = PluginConfig {
            plugins: entries.to_vec(),
        };
        let mut content = serde_json::to_string_pretty(&config)
            .map_err(|e| GrailError::decode(&self.path, e))?;
        content.push('\n');

        // Whole-file rewrite through a sibling temp file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| GrailError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| GrailError::io(&self.path, e))?;
        Ok(())
    }
}
