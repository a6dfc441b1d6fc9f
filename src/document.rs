#![allow(clippy::self_named_module_files)]

//! Loading and persisting the JSON documents taking part in a merge.

use serde_json::Value;

pub mod reader;
pub mod writer;

/// JSON type name used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
