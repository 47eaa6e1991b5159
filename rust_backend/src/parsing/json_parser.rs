use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::domain::{RawRecord, RawValue};

const PREVIEW_CHARS: usize = 500;

/// Parse a JSON row export (`[{"field": value, ...}, ...]`) from disk
pub fn parse_orders_json(json_path: &Path) -> Result<Vec<RawRecord>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_orders_json_str(&json_content)
}

/// Parse a JSON row export from a string
///
/// Each array element must be an object. Strings and numbers become cell
/// values, booleans are kept as their text; `null` and nested values are
/// treated as absent fields.
pub fn parse_orders_json_str(json_str: &str) -> Result<Vec<RawRecord>> {
    let json_value: Value = serde_json::from_str(json_str).with_context(|| {
        let preview: String = json_str.chars().take(PREVIEW_CHARS).collect();
        let ellipsis = if json_str.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        format!(
            "Invalid JSON syntax. First {} chars: {}{}",
            PREVIEW_CHARS, preview, ellipsis
        )
    })?;

    let rows = match json_value {
        Value::Array(rows) => rows,
        other => anyhow::bail!(
            "JSON must be an array of row objects, found {}",
            json_kind(&other)
        ),
    };

    rows.iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Object(fields) => Ok(object_to_record(fields)),
            other => anyhow::bail!("Row {} is {}, expected an object", idx, json_kind(other)),
        })
        .collect()
}

fn object_to_record(fields: &Map<String, Value>) -> RawRecord {
    fields
        .iter()
        .filter_map(|(key, value)| {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let cell = match value {
                Value::String(s) => RawValue::Text(s.clone()),
                Value::Number(n) => RawValue::Number(n.as_f64()?),
                Value::Bool(b) => RawValue::Text(b.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.to_string(), cell))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
