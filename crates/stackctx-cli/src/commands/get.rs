//! Get command implementation

use serde_json::Value;
use stackctx_core::SharedProvisioningContext;

use crate::error::{CliError, Result};

/// Run the get command
pub fn run_get(context: &SharedProvisioningContext, path: &str, raw: bool) -> Result<()> {
    let value = context.get(path).ok_or_else(|| CliError::not_found(path))?;
    println!("{}", format_value(value, raw)?);
    Ok(())
}

/// Render a value as pretty JSON, or bare text for strings when `raw`.
pub fn format_value(value: &Value, raw: bool) -> Result<String> {
    match value {
        Value::String(s) if raw => Ok(s.clone()),
        _ => Ok(serde_json::to_string_pretty(value)?),
    }
}
