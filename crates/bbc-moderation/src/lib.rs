//! # bbc-moderation — Submission Workflow
//!
//! Everything between an untrusted submission and a published directory
//! record:
//!
//! ```text
//! submit ──► create (pre-check + coerce + id/updated)
//!        ──► PendingStore ──► notify moderators
//! review ──► diff(candidate, approved?)
//! approve ──► DirectoryStore upsert, pending dropped
//! reject  ──► pending dropped
//! ```
//!
//! Storage and notification sit behind the [`DirectoryStore`],
//! [`PendingStore`], and [`Notifier`] traits. In-memory stores and a
//! logging notifier ship with the crate.
//!
//! [`Moderator`] is the façade the HTTP service and CLI drive.

pub mod error;
pub mod kind;
pub mod listing;
pub mod notify;
pub mod pending;
pub mod service;
pub mod store;
pub mod submission;

pub use error::{ModerationError, NotifyError};
pub use kind::EntityKind;
pub use listing::{sanitize_category, ListQuery, Page, PageMeta, DEFAULT_LIMIT, MAX_LIMIT};
pub use notify::{LogNotifier, Notice, Notifier};
pub use pending::{PendingEntry, Submitter, SUBMITTER_EMAIL_FIELD, SUBMITTER_REASON_FIELD};
pub use service::{Approval, Moderator, Review};
pub use store::{DirectoryStore, InMemoryDirectory, InMemoryPending, PendingStore, Upsert};
pub use submission::create;
