//! Error types for stackctx-fs

use std::path::PathBuf;

/// Result type for stackctx-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stackctx-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::ConfigParse { path, .. } => path,
        }
    }
}
