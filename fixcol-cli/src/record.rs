//! JSON records built from layout files
//!
//! Each decoded line becomes a JSON object keyed by field name. Bytes are
//! rendered as lowercase hex and optional values as their inner value.

use anyhow::{Context, Result};
use fixcol_core::{DecodeConfig, LayoutSpec, RecordLayout, Slot, Value};
use serde_json::{Map, Number, Value as JsonValue};
use std::fs;
use std::sync::Arc;

/// Read and parse a JSON layout file
pub fn load_layout(path: &str) -> Result<LayoutSpec> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read layout file: {}", path))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse layout file: {}", path))
}

/// Build a layout writing every tagged field into a JSON object
pub fn json_layout(spec: &LayoutSpec) -> RecordLayout<JsonValue> {
    spec.to_builder::<JsonValue, _>(|field| {
        let name = field.name.clone();
        Slot::Writable(Arc::new(move |record: &mut JsonValue, value: Value| {
            match record {
                JsonValue::Object(map) => {
                    map.insert(name.clone(), to_json(value));
                    true
                }
                _ => false,
            }
        }))
    })
    .guard(require_object)
    .build()
}

/// Decode configuration for a layout file: standard formatters, the file's
/// delimiter, then the command-line override
pub fn layout_config(spec: &LayoutSpec, delimiter: Option<&str>) -> DecodeConfig {
    let config = spec.configure(DecodeConfig::new().with_standard_formatters());
    match delimiter {
        Some(delimiter) => config.with_delimiter(delimiter),
        None => config,
    }
}

/// A fresh, empty record
pub fn empty_record() -> JsonValue {
    JsonValue::Object(Map::new())
}

/// Convert a decoded value to JSON
pub fn to_json(value: Value) -> JsonValue {
    match value {
        Value::Bool(v) => JsonValue::Bool(v),
        Value::I8(v) => v.into(),
        Value::I16(v) => v.into(),
        Value::I32(v) => v.into(),
        Value::I64(v) => v.into(),
        Value::Isize(v) => v.into(),
        Value::U8(v) => v.into(),
        Value::U16(v) => v.into(),
        Value::U32(v) => v.into(),
        Value::U64(v) => v.into(),
        Value::Usize(v) => v.into(),
        Value::F32(v) => float(f64::from(v)),
        Value::F64(v) => float(v),
        Value::String(v) => JsonValue::String(v),
        Value::Bytes(v) => JsonValue::String(hex::encode(&v)),
        Value::Optional(inner) => to_json(*inner),
    }
}

// Non-finite floats have no JSON form
fn float(v: f64) -> JsonValue {
    Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
}

fn require_object(record: &JsonValue) -> Result<(), String> {
    match record {
        JsonValue::Object(_) => Ok(()),
        JsonValue::Null => Err("nil target".to_string()),
        other => Err(format!("not a record: {}", kind_name(other))),
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
