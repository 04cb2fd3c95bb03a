//! # Candidate Creation
//!
//! Turns an untrusted submission body into a candidate record: the
//! designated-field pre-check, schema coercion, then the identifier and
//! last-modified bookkeeping fields appended after the schema fields.

use bbc_core::{Identifier, Record, RecordValue, Timestamp, ID_FIELD, LAST_MODIFIED_FIELD};
use bbc_schema::coerce_record;
use serde_json::Value;

use crate::error::ModerationError;
use crate::kind::EntityKind;

/// Build a candidate record of `kind` from `input`.
///
/// Fails only when the designated field is absent, blank, `false`, zero, or
/// contains no letters or digits to derive an identifier from. A caller-supplied
/// `updated` value is kept verbatim; otherwise the current time is stamped.
pub fn create(kind: EntityKind, input: &Value) -> Result<Record, ModerationError> {
    let field = kind.designated_field();
    let missing = || ModerationError::MissingField { kind, field };

    let present = match input.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    };
    if !present {
        return Err(missing());
    }

    let mut record = coerce_record(kind.fields(), input);
    let id = Identifier::derive(&record.get(field).map(RecordValue::to_text).unwrap_or_default());
    if id.is_empty() {
        return Err(missing());
    }
    record.insert(ID_FIELD, RecordValue::text(id.as_str()));

    let updated = match input.get(LAST_MODIFIED_FIELD) {
        Some(supplied) => RecordValue::from_json(supplied),
        None => RecordValue::text(Timestamp::now().to_iso8601()),
    };
    record.insert(LAST_MODIFIED_FIELD, updated);

    Ok(record)
}
