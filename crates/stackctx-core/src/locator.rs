//! Locating the configuration file
//!
//! The configuration path is looked up under a single key (`APP_CONFIG` by
//! default) in each source of a [`SourceSet`], in order. The first
//! non-blank value wins.

use serde::Serialize;
use stackctx_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::source::{SourceKind, SourceSet};

/// Key under which the configuration path is looked up by default
pub const DEFAULT_CONFIG_KEY: &str = "APP_CONFIG";

/// A configuration path together with the source that supplied it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigLocation {
    pub path: NormalizedPath,
    pub source: SourceKind,
}

/// Finds the configuration path for a lookup key
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    key: String,
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_KEY)
    }
}

impl ConfigLocator {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the first non-blank value for the key, tagged with its source.
    ///
    /// A value that is empty after trimming counts as not supplied and the
    /// next source is asked. Other values are used as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when no source yields a value.
    pub fn locate(&self, sources: &SourceSet) -> Result<ConfigLocation> {
        let ordered = sources.ordered();

        for source in &ordered {
            let Some(value) = source.lookup(&self.key) else {
                continue;
            };
            if value.trim().is_empty() {
                tracing::debug!(key = %self.key, source = %source.kind(), "Ignoring blank value");
                continue;
            }

            let location = ConfigLocation {
                path: NormalizedPath::new(&value),
                source: source.kind(),
            };
            tracing::info!(
                "Config file is {}, which is from {}",
                location.path,
                location.source
            );
            return Ok(location);
        }

        let checked = ordered
            .iter()
            .map(|source| source.kind().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::ConfigNotFound {
            key: self.key.clone(),
            checked,
        })
    }
}
