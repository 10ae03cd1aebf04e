//! Error types for stackctx-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from stackctx-core
    #[error(transparent)]
    Core(#[from] stackctx_core::Error),

    /// Output serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A requested dot path has no value in the assembled configuration
    #[error("No value at '{path}' in the configuration")]
    NotFound { path: String },
}

impl CliError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Label printed in the `error[...]` prefix.
    pub fn label(&self) -> String {
        match self {
            Self::Core(e) => e.kind().to_string(),
            Self::Json(_) => "Output".into(),
            Self::NotFound { .. } => "NotFound".into(),
        }
    }

    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::Core(e) => e.remediation(),
            Self::NotFound { .. } => Some("run `stackctx show` to list the configured stacks".into()),
            _ => None,
        }
    }
}
