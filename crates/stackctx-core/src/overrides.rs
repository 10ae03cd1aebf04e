//! Invocation-time path overrides
//!
//! An override names a dot path into the loaded document. Its replacement
//! value is looked up under that same path in the inline invocation
//! arguments, so `--context stacks.x.size=5` together with the override
//! path `stacks.x.size` rewrites that key.
//!
//! Overrides are applied in the order given and later ones win. A failed
//! override stops the batch without rolling back the ones already
//! applied.

use serde::Serialize;
use serde_json::Value;
use stackctx_content::ConfigDocument;

use crate::error::{Error, Result};
use crate::source::ValueSource;

/// How raw override strings become document values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueCoercion {
    /// Store every value as a string
    #[default]
    Verbatim,
    /// Parse the value as a JSON literal when it is one, else store a string
    JsonLiteral,
}

impl ValueCoercion {
    pub fn coerce(&self, raw: &str) -> Value {
        match self {
            Self::Verbatim => Value::String(raw.to_string()),
            Self::JsonLiteral => {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            }
        }
    }
}

/// A path paired with the replacement value found for it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    pub path: String,
    pub value: Option<String>,
}

impl OverrideEntry {
    pub fn new(path: impl Into<String>, value: Option<String>) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }

    /// Look up the replacement value for `path` in `values`.
    pub fn resolve(path: &str, values: &dyn ValueSource) -> Self {
        Self::new(path, values.lookup(path))
    }

    /// The replacement value, unless it is absent or empty.
    pub fn replacement(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// One override that was written into the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedOverride {
    pub path: String,
    pub previous: Option<Value>,
    pub value: Value,
}

/// What an override batch did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverrideReport {
    pub applied: Vec<AppliedOverride>,
    /// Paths that had no (or an empty) replacement value
    pub skipped: Vec<String>,
}

impl OverrideReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.skipped.is_empty()
    }
}

/// Applies override entries onto a document
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideApplier {
    coercion: ValueCoercion,
}

impl OverrideApplier {
    pub fn new(coercion: ValueCoercion) -> Self {
        Self { coercion }
    }

    /// Resolve each path against `values` and apply the results in order.
    pub fn apply_paths<S: AsRef<str>>(
        &self,
        document: &mut ConfigDocument,
        paths: &[S],
        values: &dyn ValueSource,
    ) -> Result<OverrideReport> {
        let entries: Vec<OverrideEntry> = paths
            .iter()
            .map(|path| OverrideEntry::resolve(path.as_ref(), values))
            .collect();
        self.apply(document, &entries)
    }

    /// Apply entries in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverridePath`] for the first entry whose path cannot
    /// be written. Entries before it stay applied.
    pub fn apply(
        &self,
        document: &mut ConfigDocument,
        entries: &[OverrideEntry],
    ) -> Result<OverrideReport> {
        let mut report = OverrideReport::default();

        for entry in entries {
            let Some(raw) = entry.replacement() else {
                tracing::debug!(path = %entry.path, "No override value supplied, skipping");
                report.skipped.push(entry.path.clone());
                continue;
            };

            let previous = document.read(&entry.path).cloned();
            let value = self.coercion.coerce(raw);

            document
                .write(&entry.path, value.clone())
                .map_err(|source| Error::OverridePath {
                    path: entry.path.clone(),
                    source,
                })?;

            match &previous {
                Some(old) => tracing::info!("Updated {} = {} --> {}", entry.path, old, value),
                None => tracing::warn!(
                    "Updated {} = (undefined) --> {}; the key was not in the configuration file",
                    entry.path,
                    value
                ),
            }

            report.applied.push(AppliedOverride {
                path: entry.path.clone(),
                previous,
                value,
            });
        }

        Ok(report)
    }
}
