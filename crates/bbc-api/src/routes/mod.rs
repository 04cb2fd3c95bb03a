//! # API Route Modules
//!
//! - `directory`: public reads of published records, browser submissions,
//!   and the admin delete.
//! - `pending`: the admin moderation console: review, approve, reject.

pub mod directory;
pub mod pending;
