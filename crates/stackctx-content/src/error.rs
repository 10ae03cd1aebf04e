//! Error types for stackctx-content

/// Result type for stackctx-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing a document by path
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path is empty")]
    EmptyPath,

    #[error("Cannot set {path}: segment '{segment}' does not exist")]
    MissingSegment { path: String, segment: String },

    #[error("Cannot set {path}: segment '{segment}' is not a mapping or sequence")]
    NotAContainer { path: String, segment: String },

    #[error("Cannot set {path}: index {index} is out of bounds")]
    IndexOutOfBounds { path: String, index: usize },

    #[error("Document root must be a mapping, found {found}")]
    RootNotMapping { found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The path segment a failed write stopped at, if any.
    pub fn segment(&self) -> Option<String> {
        match self {
            Self::MissingSegment { segment, .. } | Self::NotAContainer { segment, .. } => {
                Some(segment.clone())
            }
            Self::IndexOutOfBounds { index, .. } => Some(format!("[{index}]")),
            _ => None,
        }
    }
}
