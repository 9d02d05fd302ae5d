//! Export error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure writing one artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    /// Returns the path of the artifact that failed.
    pub fn path(&self) -> &Path {
        match self {
            ExportError::Io { path, .. } | ExportError::Json { path, .. } => path,
        }
    }
}
