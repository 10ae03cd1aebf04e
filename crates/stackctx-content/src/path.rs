//! Path parsing and traversal utilities
//!
//! Values in a configuration tree are addressed with dot-separated paths.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `stacks.webhookECS.rds.allocatedStorage`
//! - Array indexing: `stacks.webhookECS.ecs.services[0].name`
//!
//! Reads treat absence as an ordinary result. Writes never create missing
//! intermediate structure: every segment before the last must already
//! exist, so a typo in an override path fails instead of growing a dead
//! branch in the document.
//!
//! # Examples
//!
//! ```
//! use stackctx_content::path::{parse_path, get_at_path, set_at_path};
//! use serde_json::json;
//!
//! let mut value = json!({"stacks": {"x": {"size": 1}}});
//!
//! let path = parse_path("stacks.x.size");
//! set_at_path(&mut value, &path, json!(5)).unwrap();
//! assert_eq!(get_at_path(&value, &path), Some(&json!(5)));
//!
//! let missing = parse_path("stacks.y.size");
//! assert!(set_at_path(&mut value, &missing, json!(5)).is_err());
//! assert_eq!(get_at_path(&value, &missing), None);
//! ```

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a mapping (e.g., "rds" in "stacks.rds")
    Key(String),
    /// An index in a sequence (e.g., 0 in `services[0]`)
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// Parse a path string into segments.
///
/// Empty segments (`a..b`, a leading or trailing dot) are ignored. Bracket
/// content that is not a number is kept as a literal key such as `[x]`,
/// which never matches and therefore surfaces as a missing segment.
///
/// # Examples
///
/// ```
/// use stackctx_content::path::{parse_path, PathSegment};
///
/// let path = parse_path("stacks.ecs.services[0].name");
/// assert_eq!(path, vec![
///     PathSegment::Key("stacks".to_string()),
///     PathSegment::Key("ecs".to_string()),
///     PathSegment::Key("services".to_string()),
///     PathSegment::Index(0),
///     PathSegment::Key("name".to_string()),
/// ]);
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                match index_str.parse::<usize>() {
                    Ok(index) => segments.push(PathSegment::Index(index)),
                    Err(_) => segments.push(PathSegment::Key(format!("[{index_str}]"))),
                }
            }
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Render segments back into a dot path.
pub fn render_path(segments: &[PathSegment]) -> String {
    let mut rendered = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            PathSegment::Index(idx) => rendered.push_str(&format!("[{idx}]")),
        }
    }
    rendered
}

/// Get a reference to the value at the given path.
///
/// Returns `None` as soon as any segment is absent. An empty path
/// addresses the root.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| match segment {
            PathSegment::Key(key) => current.as_object()?.get(key),
            PathSegment::Index(idx) => current.as_array()?.get(*idx),
        })
}

/// Set the value at the given path.
///
/// Every segment except the last must already exist. The last segment is
/// assigned regardless of the type of any previous value; a missing final
/// key is inserted into its existing parent mapping.
///
/// # Errors
///
/// - [`Error::EmptyPath`] when there are no segments
/// - [`Error::MissingSegment`] naming the first absent intermediate key
/// - [`Error::IndexOutOfBounds`] for an index past the end of a sequence
/// - [`Error::NotAContainer`] naming the segment whose value cannot hold
///   the next segment
pub fn set_at_path(value: &mut Value, segments: &[PathSegment], new_value: Value) -> Result<()> {
    let (last, parents) = segments.split_last().ok_or(Error::EmptyPath)?;

    let mut current = value;
    let mut parent_name = String::from("<root>");

    for segment in parents {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => {
                map.get_mut(key).ok_or_else(|| Error::MissingSegment {
                    path: render_path(segments),
                    segment: key.clone(),
                })?
            }
            (PathSegment::Index(idx), Value::Array(arr)) => {
                arr.get_mut(*idx).ok_or_else(|| Error::IndexOutOfBounds {
                    path: render_path(segments),
                    index: *idx,
                })?
            }
            _ => {
                return Err(Error::NotAContainer {
                    path: render_path(segments),
                    segment: parent_name,
                });
            }
        };
        parent_name = segment.to_string();
    }

    match (last, current) {
        (PathSegment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), new_value);
            Ok(())
        }
        (PathSegment::Index(idx), Value::Array(arr)) => match arr.get_mut(*idx) {
            Some(slot) => {
                *slot = new_value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                path: render_path(segments),
                index: *idx,
            }),
        },
        _ => Err(Error::NotAContainer {
            path: render_path(segments),
            segment: parent_name,
        }),
    }
}
