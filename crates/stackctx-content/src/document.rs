//! The configuration document tree

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::path::{get_at_path, parse_path, set_at_path};

/// A parsed configuration tree.
///
/// The root is always a mapping. Nested values may be strings, numbers,
/// booleans, nulls, sequences or further mappings; no schema is imposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wrap an already-parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotMapping`] when `value` is not a mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_object() {
            Ok(Self { root: value })
        } else {
            Err(Error::RootNotMapping {
                found: value_kind(&value),
            })
        }
    }

    /// Parse JSON text into a document.
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Read the value at a dot path. Absence is `None`, never an error.
    ///
    /// ```
    /// use stackctx_content::ConfigDocument;
    /// use serde_json::json;
    ///
    /// let doc = ConfigDocument::parse(r#"{"project": {"name": "acme"}}"#).unwrap();
    /// assert_eq!(doc.read("project.name"), Some(&json!("acme")));
    /// assert_eq!(doc.read("project.owner"), None);
    /// ```
    pub fn read(&self, path: &str) -> Option<&Value> {
        get_at_path(&self.root, &parse_path(path))
    }

    /// Write a value at a dot path whose intermediate segments already exist.
    pub fn write(&mut self, path: &str, value: Value) -> Result<()> {
        set_at_path(&mut self.root, &parse_path(path), value)
    }

    /// Find the first top-level section present under any of `names`.
    ///
    /// Returns the key that matched together with its value, so callers
    /// can accept spelling variants such as `project` / `Project`.
    pub fn section<'a>(&self, names: &[&'a str]) -> Option<(&'a str, &Value)> {
        let map = self.root.as_object()?;
        names
            .iter()
            .find_map(|name| map.get(*name).map(|value| (*name, value)))
    }
}

/// Short name of a value's type, used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
