//! # bbc-schema — Record Schemas & Coercion
//!
//! ## Schemas (`schema`)
//!
//! A schema is a static tree of [`SchemaNode`]s: a leaf declares a
//! [`DataType`], a group declares named children. Schemas are data, defined
//! once per entity kind in [`builtin`] and never mutated.
//!
//! ## Coercion (`coerce`)
//!
//! [`coerce`] walks a schema and an untrusted JSON value in lockstep and
//! returns a record with exactly the schema's shape:
//!
//! - every declared field is present with a value of the declared type;
//! - every undeclared field is dropped, at every depth.
//!
//! Coercion is total. Malformed or hostile input is normalized, never
//! rejected, so nothing downstream of this crate can observe a field the
//! schema does not name.
//!
//! ## Crate Policy
//!
//! - Depends only on `bbc-core` internally.
//! - Schema coercion is a trust boundary: it is a whitelist filter first and
//!   a type checker second.

pub mod builtin;
pub mod coerce;
pub mod schema;

pub use builtin::{APP, APP_FIELDS, ORGANIZATION, ORGANIZATION_FIELDS};
pub use coerce::{coerce, coerce_record};
pub use schema::{DataType, Field, SchemaNode};
