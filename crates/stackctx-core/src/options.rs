//! Declared option tables with defaults
//!
//! Stack builders often read optional settings (a cache engine, a node
//! type) and fall back to a default when the file leaves them out. A
//! [`RecognizedOptions`] table declares those options and their defaults
//! in one place instead of scattering fallback literals through builder
//! code.

use serde_json::{Map, Value};

/// An ordered table of recognized options and their defaults
#[derive(Debug, Clone, Default)]
pub struct RecognizedOptions {
    defaults: Vec<(String, Value)>,
}

/// Options resolved against a configuration section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    pub values: Map<String, Value>,
    /// Keys the section set that the table does not recognize
    pub unrecognized: Vec<String>,
}

impl RecognizedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option with its default value.
    pub fn option(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defaults.push((name.into(), default.into()));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defaults.iter().map(|(name, _)| name.as_str())
    }

    /// Resolve against a section of the configuration.
    ///
    /// Explicit values win over defaults; an explicit `null` counts as
    /// unset. Unrecognized keys are reported, not merged.
    ///
    /// ```
    /// use stackctx_core::RecognizedOptions;
    /// use serde_json::json;
    ///
    /// let cache = RecognizedOptions::new()
    ///     .option("engine", "redis")
    ///     .option("numCacheNodes", 1);
    ///
    /// let section = json!({"numCacheNodes": 3});
    /// let resolved = cache.resolve(Some(&section));
    /// assert_eq!(resolved.get("engine"), Some(&json!("redis")));
    /// assert_eq!(resolved.get("numCacheNodes"), Some(&json!(3)));
    /// ```
    pub fn resolve(&self, section: Option<&Value>) -> ResolvedOptions {
        let explicit = section.and_then(Value::as_object);

        let values = self
            .defaults
            .iter()
            .map(|(name, default)| {
                let value = explicit
                    .and_then(|map| map.get(name))
                    .filter(|v| !v.is_null())
                    .unwrap_or(default);
                (name.clone(), value.clone())
            })
            .collect();

        let unrecognized = explicit
            .map(|map| {
                map.keys()
                    .filter(|key| !self.defaults.iter().any(|(name, _)| name == *key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        ResolvedOptions {
            values,
            unrecognized,
        }
    }
}

impl ResolvedOptions {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }
}
