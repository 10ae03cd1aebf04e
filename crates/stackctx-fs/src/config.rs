//! Extension-driven loading of structured configuration files

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Structured file formats understood by [`ConfigStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    /// Detect the format from a file extension.
    ///
    /// Returns `None` for extensions that carry no format information, in
    /// which case the store's default format applies.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Format-aware configuration loader.
///
/// The format is detected from the file extension; files whose extension
/// says nothing about the format are parsed with the default format
/// (JSON unless configured otherwise).
#[derive(Debug, Clone, Copy)]
pub struct ConfigStore {
    default_format: FileFormat,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            default_format: FileFormat::Json,
        }
    }
}

impl ConfigStore {
    /// Create a ConfigStore that falls back to JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ConfigStore with a different fallback format.
    pub fn with_default_format(default_format: FileFormat) -> Self {
        Self { default_format }
    }

    /// Format that will be used to parse `path`.
    pub fn format_for(&self, path: &NormalizedPath) -> FileFormat {
        path.extension()
            .and_then(FileFormat::from_extension)
            .unwrap_or(self.default_format)
    }

    /// Load and deserialize a configuration file.
    ///
    /// Parsing is all-or-nothing: a malformed file yields
    /// [`Error::ConfigParse`] and no value. Content that is not valid
    /// UTF-8 counts as malformed, not as a failed read.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = self.format_for(path);
        let content = io::read_text(path).map_err(|err| match err {
            Error::Io { path, source } if source.kind() == std::io::ErrorKind::InvalidData => {
                Error::ConfigParse {
                    path,
                    format: format.name().into(),
                    message: source.to_string(),
                }
            }
            other => other,
        })?;
        tracing::debug!(path = %path, %format, bytes = content.len(), "Parsing config file");
        Self::parse(&content, format).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: format.name().into(),
            message,
        })
    }

    fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> std::result::Result<T, String> {
        match format {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}
