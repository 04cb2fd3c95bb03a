//! # Error Types
//!
//! Failures of the moderation workflow. Coercion and diffing never fail;
//! only the caller-side pre-check and store lookups do.

use thiserror::Error;

use crate::kind::EntityKind;

/// Errors from the moderation workflow.
#[derive(Error, Debug)]
pub enum ModerationError {
    /// The designated field was absent, empty, or yielded no identifier.
    #[error("{kind} submissions require a non-empty {field:?} field")]
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },

    /// An unrecognized entity kind segment.
    #[error("unknown entity kind {0:?}")]
    UnknownKind(String),

    /// No pending entry under this id for this kind.
    #[error("no pending {kind} submission with id {id}")]
    PendingNotFound { kind: EntityKind, id: String },

    /// No canonical record under this identifier.
    #[error("no {kind} record with id {id:?}")]
    RecordNotFound { kind: EntityKind, id: String },
}

/// A notification could not be delivered.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
