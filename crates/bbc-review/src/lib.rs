//! # bbc-review — Moderation Diffs
//!
//! Turns a proposed record, and optionally the currently approved record,
//! into an ordered list of [`DiffRow`]s that a moderator reads before
//! approving or rejecting.
//!
//! ## Pipeline
//!
//! 1. [`flatten`] projects a nested record onto `dotted.path → text`,
//!    skipping bookkeeping fields at every depth.
//! 2. [`diff`] compares the two projections by text and keeps only what a
//!    moderator needs to see.
//!
//! Both steps are pure and total. Rendering the rows (HTML table, JSON) is
//! the caller's job.

pub mod diff;
pub mod flatten;

pub use diff::{diff, Change, DiffRow};
pub use flatten::{flatten, FlatView, PATH_SEPARATOR};
