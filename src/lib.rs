//! grailx - Aggregates tool manifests into a prompt for terminal AI agents

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod error;
pub mod manifest;
pub mod merge;
pub mod models;
pub mod prompt;
pub mod registry;
