//! # Whitelist Coercion
//!
//! Recursive descent over a schema tree in lockstep with an untrusted JSON
//! value.
//!
//! - **Group node**: each declared child is read from the input object. A
//!   missing or non-object input counts as an empty object, so its children
//!   take their defaults.
//! - **Leaf node**: the input is trimmed if it is text, then coerced to the
//!   declared [`DataType`]. Absent and `null` inputs are equivalent.
//!
//! ## Leaf Rules
//!
//! | Type      | Rule                                                          |
//! |-----------|---------------------------------------------------------------|
//! | `boolean` | text: `true` iff lower-cased text is `"true"`; otherwise the truthiness table below |
//! | `string`  | `null` / absent / `"undefined"` → `""`; else stringified and trimmed |
//! | `array`   | `null` / absent → `[]`; sequence → elements trimmed, order kept; scalar → one-element sequence |
//! | `integer` | leading base-10 integer of the text form, else `0`; saturates at the `i64` range |
//! | `number`  | leading decimal float of the text form, else `0`; non-finite → `0` |
//!
//! `integer` and `number` read only numbers and text. Sequences and groups
//! become `0`, even a one-element sequence such as `[" 7"]`.
//!
//! Truthiness of non-text values: `null`, `false`, `0`, `[]` and `{}` are
//! false; everything else is true.
//!
//! ## Invariants
//!
//! - Output has exactly the schema's shape. Undeclared fields never appear.
//! - Coercion never fails and never panics.
//! - Coercion is idempotent: coercing a coerced record changes nothing.

use bbc_core::{json_text, trim_value, Record, RecordValue, Scalar};
use serde_json::Value;

use crate::schema::{DataType, Field, SchemaNode};

/// Coerce `input` into the shape of `schema`.
///
/// A group schema yields [`RecordValue::Group`]; a leaf schema coerces the
/// input directly.
pub fn coerce(schema: &SchemaNode, input: &Value) -> RecordValue {
    match schema {
        SchemaNode::Leaf(data_type) => coerce_leaf(*data_type, input),
        SchemaNode::Group(fields) => RecordValue::Group(coerce_record(fields, input)),
    }
}

/// Coerce `input` into a record with exactly the given fields.
pub fn coerce_record(fields: &[Field], input: &Value) -> Record {
    let object = input.as_object();
    fields
        .iter()
        .map(|(name, node)| {
            let child = object.and_then(|map| map.get(*name)).unwrap_or(&Value::Null);
            ((*name).to_string(), coerce(node, child))
        })
        .collect()
}

fn coerce_leaf(data_type: DataType, raw: &Value) -> RecordValue {
    let value = trim_value(raw);
    match data_type {
        DataType::Boolean => RecordValue::Scalar(Scalar::Bool(to_boolean(&value))),
        DataType::String => RecordValue::Scalar(Scalar::Text(to_text(&value))),
        DataType::Array => RecordValue::List(to_list(&value)),
        DataType::Integer => RecordValue::Scalar(Scalar::Integer(to_integer(&value))),
        DataType::Number => RecordValue::Scalar(Scalar::Number(to_number(&value))),
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::String(s) => s.to_lowercase() == "true",
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if s == "undefined" => String::new(),
        other => json_text(other).trim().to_string(),
    }
}

fn to_list(value: &Value) -> Vec<Scalar> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| Scalar::from_json_lossy(&trim_value(item)))
            .collect(),
        scalar => vec![Scalar::from_json_lossy(scalar)],
    }
}

fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i,
            (None, Some(_)) => i64::MAX,
            // `as` saturates; JSON numbers are never NaN.
            (None, None) => n.as_f64().map_or(0, |f| f.trunc() as i64),
        },
        Value::String(s) => parse_integer_prefix(s),
        _ => 0,
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_float_prefix(s),
        _ => 0.0,
    }
}

/// Leading `[+-]?[0-9]+` of `s` after leading whitespace.
fn parse_integer_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Leading decimal literal of `s` after leading whitespace:
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::builtin::ORGANIZATION;
    use proptest::prelude::*;

    /// Arbitrary JSON, floats included, with keys drawn so that some hit
    /// declared organization fields and some do not.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|f| serde_json::json!(f)),
            "[ a-zA-Z0-9_.+-]{0,20}".prop_map(Value::String),
            Just(Value::String(" TRUE ".into())),
            Just(Value::String("undefined".into())),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map(
                    prop_oneof![
                        Just("organization".to_string()),
                        Just("url".to_string()),
                        Just("web".to_string()),
                        Just("view".to_string()),
                        Just("states".to_string()),
                        Just("transmit".to_string()),
                        Just("direct".to_string()),
                        "[a-z_]{1,10}",
                    ],
                    inner,
                    0..6
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Every group level of `value` has exactly the declared keys, in order.
    fn has_exact_shape(schema: &SchemaNode, value: &RecordValue) -> bool {
        match (schema, value) {
            (SchemaNode::Leaf(DataType::Array), RecordValue::List(_)) => true,
            (SchemaNode::Leaf(_), RecordValue::Scalar(s)) => !matches!(s, Scalar::Null),
            (SchemaNode::Group(fields), RecordValue::Group(record)) => {
                record.len() == fields.len()
                    && fields.iter().zip(record.iter()).all(|((name, node), (key, child))| {
                        *name == key.as_str() && has_exact_shape(node, child)
                    })
            }
            _ => false,
        }
    }

    proptest! {
        /// Coercion is total and output always has the schema's exact shape.
        #[test]
        fn output_has_exact_schema_shape(input in json_value()) {
            let out = coerce(&ORGANIZATION, &input);
            prop_assert!(has_exact_shape(&ORGANIZATION, &out), "bad shape: {:?}", out);
        }

        /// Coercing a coerced record changes nothing.
        #[test]
        fn coercion_is_idempotent(input in json_value()) {
            let once = coerce(&ORGANIZATION, &input);
            let twice = coerce(&ORGANIZATION, &once.to_json());
            prop_assert_eq!(once, twice);
        }

        /// Leaf coercion is idempotent for every data type.
        #[test]
        fn leaf_coercion_is_idempotent(input in json_value()) {
            for dt in [DataType::String, DataType::Boolean, DataType::Array, DataType::Integer, DataType::Number] {
                let node = SchemaNode::Leaf(dt);
                let once = coerce(&node, &input);
                let twice = coerce(&node, &once.to_json());
                prop_assert_eq!(once, twice);
            }
        }
    }
}
