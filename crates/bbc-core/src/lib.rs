//! # bbc-core — Foundational Types for the Connector Directory
//!
//! Every other crate in the workspace depends on `bbc-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Records are a closed tagged tree.** A [`RecordValue`] is a
//!    [`Scalar`], a list of scalars, or a nested [`Record`]. Consumers match
//!    on the variant; nothing probes "is this a plain object" at runtime.
//!
//! 2. **Insertion order is part of the value.** [`Record`] is backed by an
//!    `IndexMap`, so a record produced from a schema keeps the schema's field
//!    order through serialization and diffing.
//!
//! 3. **Identifiers are derived, never typed in.** [`Identifier::derive`] is
//!    the only way to turn a human-readable name into a directory key.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] renders `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bbc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;
pub mod text;

pub use error::CoreError;
pub use identity::{Identifier, PendingId};
pub use record::{
    Record, RecordValue, Scalar, BOOKKEEPING_FIELDS, ID_FIELD, INTERNAL_ID_FIELD, KIND_FIELD,
    LAST_MODIFIED_FIELD,
};
pub use temporal::Timestamp;
pub use text::{format_number, json_text, trim_value};
