//! CLI commands for grailx

use anyhow::{Context, Result};
use std::io::Write;

use crate::aggregate::Aggregator;
use crate::config::ProjectPaths;
use crate::error::GrailError;
use crate::manifest::FsManifestStore;
use crate::models::Manifest;
use crate::prompt::PromptRenderer;
use crate::registry::{resolve, FileRegistry, RegistryStore};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Prompt,
}

/// Plugin registry operations
#[derive(Debug, Clone)]
pub enum PluginOperation {
    List { resolved: bool },
    Add { entry: String },
    Remove { entry: String },
}

/// Aggregate the project's manifests from disk
pub fn load_aggregate(paths: &ProjectPaths) -> Result<Manifest, GrailError> {
    let registry = FileRegistry::new(paths);
    Aggregator::new(paths, &FsManifestStore, &registry).aggregate()
}

/// Print the agent prompt (or the aggregate manifest as JSON)
pub fn prompt(paths: &ProjectPaths, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let manifest = load_aggregate(paths)?;
    match format {
        OutputFormat::Prompt => {
            writeln!(out, "{}", PromptRenderer::render(&manifest))?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&manifest)
                .context("Failed to serialize manifest")?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

/// Print the prompt followed by the agent command to launch
pub fn run(paths: &ProjectPaths, agent: &str, out: &mut impl Write) -> Result<()> {
    if agent.is_empty() {
        return Err(GrailError::Usage(r#"usage: grailx run --agent "<command>""#.to_string()).into());
    }
    let manifest = load_aggregate(paths)?;
    writeln!(out, "{}", PromptRenderer::render(&manifest))?;
    writeln!(out, "---")?;
    writeln!(out, "Run this agent command in the same shell:")?;
    writeln!(out, "{}", agent)?;
    Ok(())
}

/// Handle plugin registry operations
pub fn plugins(paths: &ProjectPaths, operation: PluginOperation, out: &mut impl Write) -> Result<()> {
    let registry = FileRegistry::new(paths);
    match operation {
        PluginOperation::List { resolved } => {
            let entries = registry
                .load()
                .with_context(|| format!("Failed to read {}", registry.path().display()))?;
            for entry in entries {
                if resolved {
                    writeln!(out, "{}\t{}", entry, resolve(&paths.root, &entry).display())?;
                } else {
                    writeln!(out, "{}", entry)?;
                }
            }
        }
        PluginOperation::Add { entry } => {
            registry.add(&entry)?;
        }
        PluginOperation::Remove { entry } => {
            registry.remove(&entry)?;
        }
    }
    Ok(())
}
