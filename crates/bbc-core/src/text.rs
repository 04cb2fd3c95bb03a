//! # Text Primitives
//!
//! Trimming and stringification shared by the coercer (which turns
//! arbitrary JSON into typed leaves) and the differ (which compares leaves
//! by their text).

use serde_json::Value;

/// Magnitude below which integral floats print without a fractional part.
const INTEGRAL_PRINT_LIMIT: f64 = 1e15;

/// Trim surrounding whitespace if the value is text; other values pass
/// through unchanged.
pub fn trim_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other.clone(),
    }
}

/// Render a float the way it is shown to moderators: integral values drop
/// the `.0` (`3.0` → `"3"`), everything else uses the shortest round-trip
/// decimal form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < INTEGRAL_PRINT_LIMIT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Textual form of any JSON value.
///
/// Strings are returned as-is, scalars in their display form, and objects
/// and arrays as compact JSON.
pub fn json_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => format_number(f),
            (None, None, None) => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
