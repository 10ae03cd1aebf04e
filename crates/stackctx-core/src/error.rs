//! Error types for stackctx-core

use std::fmt;
use std::path::PathBuf;

/// Result type for stackctx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy reported to users.
///
/// Every [`Error`] maps onto exactly one kind; the CLI prints the kind
/// alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No source yielded a config path, or the project identity is incomplete
    ConfigNotFound,
    /// The located file could not be read
    ConfigRead,
    /// The file is not a well-formed structured document
    ConfigParse,
    /// An override path has a missing intermediate segment
    OverridePath,
    /// An invocation argument is malformed
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConfigNotFound => "ConfigNotFound",
            Self::ConfigRead => "ConfigRead",
            Self::ConfigParse => "ConfigParse",
            Self::OverridePath => "OverridePath",
            Self::InvalidArgument => "InvalidArgument",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No source supplied a configuration path
    #[error("No configuration file given for {key} (checked {checked})")]
    ConfigNotFound { key: String, checked: String },

    /// The document has no project section
    #[error("Configuration has no project section (expected 'project' or 'Project')")]
    MissingProjectSection,

    /// The project section lacks a required field
    #[error("Configuration is missing required field '{section}.{field}'")]
    MissingProjectField { section: String, field: String },

    /// The located file could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a well-formed structured document
    #[error("Configuration file {path} is not valid {format}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// An override could not be written into the document
    #[error("Invalid override '{path}': {source}")]
    OverridePath {
        path: String,
        #[source]
        source: stackctx_content::Error,
    },

    /// A `KEY=VALUE` invocation argument is malformed
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Assembly was attempted again after it had already failed
    #[error("Context assembly failed earlier: {message}")]
    AssemblyFailed { kind: ErrorKind, message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. }
            | Self::MissingProjectSection
            | Self::MissingProjectField { .. } => ErrorKind::ConfigNotFound,
            Self::ConfigRead { .. } => ErrorKind::ConfigRead,
            Self::ConfigParse { .. } => ErrorKind::ConfigParse,
            Self::OverridePath { .. } => ErrorKind::OverridePath,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::AssemblyFailed { kind, .. } => *kind,
        }
    }

    /// The path segment an override stopped at.
    pub fn override_segment(&self) -> Option<String> {
        match self {
            Self::OverridePath { source, .. } => source.segment(),
            _ => None,
        }
    }

    /// A hint telling the user what to change.
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::ConfigNotFound { key, .. } => Some(format!(
                "set the environment variable (export {key}=config/app-config-xxx.json) \
                 or pass an inline argument (--context {key}=config/app-config-xxx.json)"
            )),
            Self::MissingProjectSection => {
                Some("add a 'project' object with name, stage, account and region".into())
            }
            Self::MissingProjectField { section, field } => Some(format!(
                "add a non-empty '{field}' string to the '{section}' object"
            )),
            Self::ConfigRead { path, .. } => Some(format!(
                "check that {} exists and is a readable file",
                path.display()
            )),
            Self::ConfigParse { path, .. } => {
                Some(format!("fix the syntax of {}", path.display()))
            }
            Self::OverridePath { .. } => Some(
                "override paths must point into keys that already exist in the configuration file"
                    .into(),
            ),
            Self::InvalidArgument { .. } => Some("arguments take the form KEY=VALUE".into()),
            Self::AssemblyFailed { .. } => None,
        }
    }
}

impl From<stackctx_fs::Error> for Error {
    fn from(err: stackctx_fs::Error) -> Self {
        match err {
            stackctx_fs::Error::Io { path, source } => Self::ConfigRead { path, source },
            stackctx_fs::Error::ConfigParse {
                path,
                format,
                message,
            } => Self::ConfigParse {
                path,
                format,
                message,
            },
        }
    }
}
