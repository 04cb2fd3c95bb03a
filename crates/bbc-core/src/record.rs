//! # Record Model
//!
//! A record is a nested, insertion-ordered mapping whose values are
//! statically one of three shapes:
//!
//! ```text
//! RecordValue = Scalar(null | bool | integer | number | text)
//!             | List([Scalar])
//!             | Group(Record)
//! ```
//!
//! Records serialize as plain JSON objects (the enums are `untagged`), so a
//! record written by this service reads back as the same tree. Reading goes
//! through [`RecordValue::from_json`], so any JSON document deserializes,
//! including lists whose elements are objects or lists.
//!
//! ## Bookkeeping Fields
//!
//! Four field names carry storage metadata rather than directory content:
//! [`ID_FIELD`], [`INTERNAL_ID_FIELD`], [`KIND_FIELD`] and
//! [`LAST_MODIFIED_FIELD`]. They are listed in [`BOOKKEEPING_FIELDS`] and are
//! invisible to the differ.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::text::{format_number, json_text};

/// Public identifier of a canonical record.
pub const ID_FIELD: &str = "id";
/// Store-internal key of a persisted document.
pub const INTERNAL_ID_FIELD: &str = "_id";
/// Entity kind tag carried by pending entries.
pub const KIND_FIELD: &str = "type";
/// Last-modified stamp.
pub const LAST_MODIFIED_FIELD: &str = "updated";

/// Field names excluded from every flattened view, at any depth.
pub const BOOKKEEPING_FIELDS: [&str; 4] =
    [ID_FIELD, INTERNAL_ID_FIELD, KIND_FIELD, LAST_MODIFIED_FIELD];

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Convert a JSON scalar. Returns `None` for arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Number(n.as_f64().unwrap_or(0.0)),
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert a JSON value, rendering compound values as their compact
    /// JSON text so the result is always a scalar.
    pub fn from_json_lossy(value: &Value) -> Self {
        Self::from_json(value).unwrap_or_else(|| Self::Text(json_text(value)))
    }

    /// JSON form. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::Number((*i).into()),
            Self::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    /// Text shown in review tables. `Null` renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }

    /// Borrow the text if this is a `Text` scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A value stored under a record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Group(Record),
}

impl<'de> Deserialize<'de> for RecordValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

impl RecordValue {
    /// Shorthand for a text scalar.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(s.into()))
    }

    /// Convert arbitrary JSON: objects become groups, arrays become lists
    /// (compound elements as JSON text). Groups take the object's key order,
    /// which is document order because `serde_json` is built with
    /// `preserve_order`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Group(Record::from_json_map(map)),
            Value::Array(items) => Self::List(items.iter().map(Scalar::from_json_lossy).collect()),
            scalar => Self::Scalar(Scalar::from_json_lossy(scalar)),
        }
    }

    /// JSON form of this value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(s) => s.to_json(),
            Self::List(items) => Value::Array(items.iter().map(Scalar::to_json).collect()),
            Self::Group(record) => record.to_json(),
        }
    }

    /// Text of a leaf. Lists join their elements with `,`; groups render as
    /// compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(s) => s.to_text(),
            Self::List(items) => items
                .iter()
                .map(Scalar::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Self::Group(record) => record.to_json().to_string(),
        }
    }

    /// Borrow the nested record if this is a group.
    pub fn as_group(&self) -> Option<&Record> {
        match self {
            Self::Group(record) => Some(record),
            _ => None,
        }
    }

    /// Borrow the text if this is a text scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            _ => None,
        }
    }
}

impl From<Scalar> for RecordValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Record> for RecordValue {
    fn from(r: Record) -> Self {
        Self::Group(r)
    }
}

/// Insertion-ordered mapping from field name to [`RecordValue`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, RecordValue>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Convert a JSON value, keeping the object's key order. Anything that is
    /// not an object yields an empty record.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Self::new(),
        }
    }

    fn from_json_map(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(k, v)| (k.clone(), RecordValue::from_json(v)))
            .collect()
    }

    /// JSON object form, preserving field order.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Insert or replace a field. New fields go to the end; replaced fields
    /// keep their position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RecordValue>) -> Option<RecordValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Remove a field, keeping the order of the others.
    pub fn remove(&mut self, field: &str) -> Option<RecordValue> {
        self.0.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&RecordValue> {
        self.0.get(field)
    }

    /// Text of a top-level text field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(RecordValue::as_str)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RecordValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, RecordValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a RecordValue);
    type IntoIter = indexmap::map::Iter<'a, String, RecordValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
