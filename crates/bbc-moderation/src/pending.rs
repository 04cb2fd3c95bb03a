//! # Pending Entries
//!
//! A pending entry wraps a candidate record with its queue key, its kind,
//! and whatever the submitter told us about themselves. Submitter fields
//! live outside the schema: coercion strips them from the body, the entry
//! carries them for the moderator, and approval drops them again.
//!
//! On the wire an entry is one flat object:
//! `{_id, type, <candidate fields...>, submitter_email?, submitter_reason?}`.

use bbc_core::{json_text, PendingId, Record, INTERNAL_ID_FIELD, KIND_FIELD};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::kind::EntityKind;

pub const SUBMITTER_EMAIL_FIELD: &str = "submitter_email";
pub const SUBMITTER_REASON_FIELD: &str = "submitter_reason";

/// Who proposed a change, and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submitter {
    pub email: Option<String>,
    pub reason: Option<String>,
}

impl Submitter {
    /// Pick the submitter fields out of a raw submission body. Blank and
    /// null values are treated as absent.
    pub fn from_input(input: &Value) -> Self {
        Self {
            email: submitter_text(input.get(SUBMITTER_EMAIL_FIELD)),
            reason: submitter_text(input.get(SUBMITTER_REASON_FIELD)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.reason.is_none()
    }
}

fn submitter_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(json_text(other)),
    }
}

/// A submission waiting for moderation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub id: PendingId,
    pub kind: EntityKind,
    /// Candidate record, without submitter fields.
    pub record: Record,
    pub submitter: Submitter,
}

impl PendingEntry {
    pub fn new(kind: EntityKind, record: Record, submitter: Submitter) -> Self {
        Self {
            id: PendingId::new(),
            kind,
            record,
            submitter,
        }
    }

    /// Identifier the candidate would publish under.
    pub fn record_id(&self) -> Option<&str> {
        self.record.get_str(bbc_core::ID_FIELD)
    }
}

impl Serialize for PendingEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(INTERNAL_ID_FIELD, &self.id)?;
        map.serialize_entry(KIND_FIELD, &self.kind)?;
        for (field, value) in &self.record {
            if field == INTERNAL_ID_FIELD || field == KIND_FIELD {
                continue;
            }
            map.serialize_entry(field, value)?;
        }
        if let Some(email) = &self.submitter.email {
            map.serialize_entry(SUBMITTER_EMAIL_FIELD, email)?;
        }
        if let Some(reason) = &self.submitter.reason {
            map.serialize_entry(SUBMITTER_REASON_FIELD, reason)?;
        }
        map.end()
    }
}
