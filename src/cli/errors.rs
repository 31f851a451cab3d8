use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Workspace is not a directory: {path:?}")]
    WorkspaceNotFound { path: PathBuf },

    #[error("Failed to load config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: s2nir::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
