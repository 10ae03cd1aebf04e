//! Named value sources consulted during configuration resolution
//!
//! A source answers "what value does key K have here?". Inline invocation
//! arguments, the process environment and a fixed fallback path are the
//! sources stackctx knows about; [`SourceSet`] fixes the order in which
//! they are asked.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    #[serde(rename = "InLine-Argument")]
    InlineArgument,
    #[serde(rename = "Environment-Variable")]
    EnvironmentVariable,
    Fallback,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InlineArgument => "InLine-Argument",
            Self::EnvironmentVariable => "Environment-Variable",
            Self::Fallback => "Fallback",
        };
        f.write_str(label)
    }
}

/// A lookup of string values by key
pub trait ValueSource {
    /// Which kind of source this is, for diagnostics
    fn kind(&self) -> SourceKind;

    /// Look up `key`, returning the raw value if the source defines it
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Inline `KEY=VALUE` arguments given at invocation time.
///
/// Insertion order is kept; when a key is given more than once the last
/// value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    entries: Vec<(String, String)>,
}

impl InvocationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of `KEY=VALUE` strings.
    ///
    /// The value may itself contain `=`; only the first one splits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an entry with no `=` or an
    /// empty key.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::new();
        for arg in args {
            let (key, value) = parse_entry(arg.as_ref())?;
            parsed.insert(key, value);
        }
        Ok(parsed)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder form of [`InvocationArgs::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a single `KEY=VALUE` argument.
pub fn parse_entry(arg: &str) -> Result<(String, String)> {
    let Some((key, value)) = arg.split_once('=') else {
        return Err(Error::InvalidArgument {
            argument: arg.to_string(),
            reason: "expected KEY=VALUE".into(),
        });
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidArgument {
            argument: arg.to_string(),
            reason: "key is empty".into(),
        });
    }
    Ok((key.to_string(), value.to_string()))
}

impl ValueSource for InvocationArgs {
    fn kind(&self) -> SourceKind {
        SourceKind::InlineArgument
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ValueSource for ProcessEnv {
    fn kind(&self) -> SourceKind {
        SourceKind::EnvironmentVariable
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of values tagged with a source kind.
///
/// Stands in for the environment when embedding stackctx or in tests,
/// where mutating the real process environment is not wanted.
#[derive(Debug, Clone)]
pub struct MapSource {
    kind: SourceKind,
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ValueSource for MapSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// A default configuration path answered for any key
#[derive(Debug, Clone)]
pub struct FallbackPath {
    path: String,
}

impl FallbackPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ValueSource for FallbackPath {
    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }

    fn lookup(&self, _key: &str) -> Option<String> {
        Some(self.path.clone())
    }
}

/// The ordered sources consulted for one invocation.
///
/// Inline arguments always come first; further sources are asked in the
/// order they were added. Override values are looked up in the inline
/// arguments only.
pub struct SourceSet {
    args: InvocationArgs,
    rest: Vec<Box<dyn ValueSource>>,
}

impl SourceSet {
    /// Sources consisting of the inline arguments alone.
    pub fn new(args: InvocationArgs) -> Self {
        Self {
            args,
            rest: Vec::new(),
        }
    }

    /// Inline arguments followed by the process environment.
    pub fn standard(args: InvocationArgs) -> Self {
        Self::new(args).with_source(ProcessEnv)
    }

    /// Append a source after the ones already present.
    pub fn with_source(mut self, source: impl ValueSource + 'static) -> Self {
        self.rest.push(Box::new(source));
        self
    }

    pub fn args(&self) -> &InvocationArgs {
        &self.args
    }

    /// All sources in lookup order.
    pub fn ordered(&self) -> Vec<&dyn ValueSource> {
        let mut sources: Vec<&dyn ValueSource> = Vec::with_capacity(self.rest.len() + 1);
        sources.push(&self.args);
        for source in &self.rest {
            sources.push(&**source);
        }
        sources
    }
}

impl fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSet")
            .field("args", &self.args)
            .field(
                "order",
                &self.ordered().iter().map(|s| s.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
