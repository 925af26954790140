//! Manifest aggregation: base manifest plus every plugin, merged in order

use std::path::PathBuf;

use crate::config::ProjectPaths;
use crate::error::{GrailError, Result};
use crate::manifest::ManifestStore;
use crate::merge::MergeEngine;
use crate::models::Manifest;
use crate::registry::{resolve, RegistryStore};

/// Where plugin manifests came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Entries listed in the registry, in registry order
    Registry(Vec<String>),
    /// Files found by scanning the plugins directory
    Scan,
}

/// Builds the aggregate manifest for a project
pub struct Aggregator<'a, M, R> {
    paths: &'a ProjectPaths,
    manifests: &'a M,
    registry: &'a R,
}

impl<'a, M: ManifestStore, R: RegistryStore> Aggregator<'a, M, R> {
    pub fn new(paths: &'a ProjectPaths, manifests: &'a M, registry: &'a R) -> Self {
        Self {
            paths,
            manifests,
            registry,
        }
    }

    /// Load, merge and validate
    ///
    /// Fails on an undecodable base manifest or registry, and with
    /// [`GrailError::NotInitialized`] when the result has no commands, env
    /// hints or schemas. Plugin manifests that fail to load are skipped.
    pub fn aggregate(&self) -> Result<Manifest> {
        let base = self.manifests.load(&self.paths.manifest)?;

        let merged = self
            .plugin_locations()?
            .into_iter()
            .filter_map(|location| self.load_plugin(location))
            .fold(base, |acc, plugin| MergeEngine::merge(&acc, &plugin));

        if merged.is_empty() {
            return Err(GrailError::NotInitialized);
        }
        Ok(merged)
    }

    /// Registry entries if any are registered, otherwise a directory scan
    pub fn plugin_source(&self) -> Result<PluginSource> {
        let entries = self.registry.load()?;
        if entries.is_empty() {
            Ok(PluginSource::Scan)
        } else {
            Ok(PluginSource::Registry(entries))
        }
    }

    /// Plugin manifest locations, in merge order
    pub fn plugin_locations(&self) -> Result<Vec<PathBuf>> {
        let locations = match self.plugin_source()? {
            PluginSource::Registry(entries) => {
                tracing::debug!(count = entries.len(), "using registered plugins");
                entries
                    .iter()
                    .map(|entry| resolve(&self.paths.root, entry))
                    .collect()
            }
            PluginSource::Scan => {
                let found = self.manifests.discover(&self.paths.plugins);
                tracing::debug!(
                    dir = %self.paths.plugins.display(),
                    count = found.len(),
                    "no registered plugins, scanned plugin directory"
                );
                found
            }
        };
        Ok(locations)
    }

    fn load_plugin(&self, location: PathBuf) -> Option<Manifest> {
        match self.manifests.load(&location) {
            Ok(manifest) => {
                tracing::debug!(path = %location.display(), "merging plugin manifest");
                Some(manifest)
            }
            Err(e) => {
                tracing::debug!(path = %location.display(), error = %e, "skipping plugin manifest");
                None
            }
        }
    }
}
