//! # Error Types
//!
//! Errors raised by the foundational types. The coercion and diff engines
//! are total and never produce these; they surface only where a caller
//! parses external text into a typed value.

use thiserror::Error;

/// Top-level error type for `bbc-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be parsed.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A pending-entry identifier was not a UUID.
    #[error("invalid pending id {0:?}")]
    InvalidPendingId(String),
}
