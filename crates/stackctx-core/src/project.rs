//! Project identity read from the configuration document

use serde::Serialize;
use serde_json::Value;
use stackctx_content::ConfigDocument;

use crate::error::{Error, Result};

/// Accepted spellings of the project section, in lookup order
pub const PROJECT_SECTIONS: [&str; 2] = ["project", "Project"];

/// Accepted spellings of the stack section, in lookup order
pub const STACK_SECTIONS: [&str; 2] = ["stacks", "Stack"];

/// Who and where a deployment targets.
///
/// Field names are accepted in lower case (`name`) or capitalized
/// (`Name`). `profile` is optional; every other field must be a non-empty
/// string. Numeric values are accepted for string fields since account
/// ids are often written as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    pub name: String,
    pub stage: String,
    pub account: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl ProjectIdentity {
    /// Read the identity from a document.
    ///
    /// # Errors
    ///
    /// [`Error::MissingProjectSection`] when no project section exists and
    /// [`Error::MissingProjectField`] for the first absent or blank
    /// required field.
    pub fn from_document(document: &ConfigDocument) -> Result<Self> {
        let (section_key, section) = document
            .section(&PROJECT_SECTIONS)
            .ok_or(Error::MissingProjectSection)?;

        let required = |field: &str| {
            string_field(section, field).ok_or_else(|| Error::MissingProjectField {
                section: section_key.to_string(),
                field: field.to_string(),
            })
        };

        Ok(Self {
            name: required("name")?,
            stage: required("stage")?,
            account: required("account")?,
            region: required("region")?,
            profile: string_field(section, "profile"),
        })
    }
}

/// Look up `field` or its capitalized form as a non-blank string.
fn string_field(section: &Value, field: &str) -> Option<String> {
    let value = section
        .get(field)
        .or_else(|| section.get(capitalize(field).as_str()))?;

    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.trim().is_empty() { None } else { Some(text) }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
