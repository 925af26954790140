//! Error taxonomy shared by the stores, the aggregator and the CLI

use std::path::PathBuf;

/// Errors surfaced by grailx operations
///
/// A missing manifest or registry file is never an error: the stores
/// recover it as an empty default before it reaches this type.
#[derive(Debug, thiserror::Error)]
pub enum GrailError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("no manifests found; run 'grail init' first")]
    NotInitialized,
}

impl GrailError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GrailError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        GrailError::Decode {
            path: path.into(),
            source,
        }
    }

    /// True for structurally invalid documents
    pub fn is_decode(&self) -> bool {
        matches!(self, GrailError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, GrailError>;
