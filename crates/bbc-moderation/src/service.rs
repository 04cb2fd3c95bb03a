//! # Moderation Service
//!
//! [`Moderator`] ties candidate creation, the two stores, the differ, and
//! the notifier into the operations the HTTP layer exposes. It is cheap to
//! clone; clones share stores.

use std::fmt;
use std::sync::Arc;

use bbc_core::{Identifier, PendingId, Record, ID_FIELD, INTERNAL_ID_FIELD, KIND_FIELD};
use bbc_review::{diff, DiffRow};
use serde::Serialize;
use serde_json::Value;

use crate::error::ModerationError;
use crate::kind::EntityKind;
use crate::listing::{ListQuery, Page, PageMeta};
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::pending::{PendingEntry, Submitter};
use crate::store::{DirectoryStore, InMemoryDirectory, InMemoryPending, PendingStore, Upsert};
use crate::submission::create;

/// What a moderator sees before deciding.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub pending: PendingEntry,
    /// The currently published record with the same identifier, if any.
    pub existing: Option<Record>,
    pub rows: Vec<DiffRow>,
}

/// Result of approving a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub kind: EntityKind,
    pub id: Identifier,
    pub outcome: Upsert,
}

/// Entry point for the submission and moderation workflow.
#[derive(Clone)]
pub struct Moderator {
    directory: Arc<dyn DirectoryStore>,
    pending: Arc<dyn PendingStore>,
    notifier: Arc<dyn Notifier>,
    review_base: String,
}

impl fmt::Debug for Moderator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Moderator")
            .field("review_base", &self.review_base)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Moderator {
    pub fn new(
        directory: Arc<dyn DirectoryStore>,
        pending: Arc<dyn PendingStore>,
        notifier: Arc<dyn Notifier>,
        review_base: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            pending,
            notifier,
            review_base: review_base.into(),
        }
    }

    /// In-memory stores with a logging notifier.
    pub fn in_memory(review_base: impl Into<String>) -> Self {
        Self::new(
            Arc::new(InMemoryDirectory::new()),
            Arc::new(InMemoryPending::new()),
            Arc::new(LogNotifier::default()),
            review_base,
        )
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Validate and queue a submission, then notify moderators.
    ///
    /// A notifier failure is logged; the entry stays queued.
    pub fn submit(&self, kind: EntityKind, input: &Value) -> Result<PendingEntry, ModerationError> {
        let record = create(kind, input)?;
        let entry = PendingEntry::new(kind, record, Submitter::from_input(input));
        self.pending.insert(entry.clone());

        tracing::info!(
            kind = %kind,
            id = entry.record_id().unwrap_or_default(),
            pending_id = %entry.id,
            "submission queued"
        );

        let notice = Notice::for_submission(&entry, &self.review_base);
        if let Err(e) = self.notifier.notify(&notice) {
            tracing::warn!(pending_id = %entry.id, error = %e, "moderator notification failed");
        }
        Ok(entry)
    }

    /// Diff a pending submission against what is currently published.
    pub fn review(&self, kind: EntityKind, pending_id: &str) -> Result<Review, ModerationError> {
        let pending = self.find_pending(kind, pending_id)?;
        let existing = pending
            .record_id()
            .and_then(|id| self.directory.get(kind, id));
        let rows = diff(&pending.record, existing.as_ref());
        Ok(Review {
            pending,
            existing,
            rows,
        })
    }

    /// Publish a pending submission, replacing any record with the same
    /// identifier, and drop it from the queue.
    pub fn approve(&self, kind: EntityKind, pending_id: &str) -> Result<Approval, ModerationError> {
        let entry = self.take_pending(kind, pending_id)?;
        let mut record = entry.record;
        record.remove(INTERNAL_ID_FIELD);
        record.remove(KIND_FIELD);

        let id = match record.get(ID_FIELD) {
            Some(value) => Identifier::derive(&value.to_text()),
            None => Identifier::derive(
                &record
                    .get(kind.designated_field())
                    .map(|v| v.to_text())
                    .unwrap_or_default(),
            ),
        };
        let outcome = self.directory.upsert(kind, id.clone(), record);

        tracing::info!(kind = %kind, id = %id, outcome = ?outcome, "submission approved");
        Ok(Approval { kind, id, outcome })
    }

    /// Drop a pending submission without publishing it.
    pub fn reject(&self, kind: EntityKind, pending_id: &str) -> Result<PendingEntry, ModerationError> {
        let entry = self.take_pending(kind, pending_id)?;
        tracing::info!(kind = %kind, pending_id = %entry.id, "submission rejected");
        Ok(entry)
    }

    /// A published record.
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<Record, ModerationError> {
        self.directory
            .get(kind, id)
            .ok_or_else(|| ModerationError::RecordNotFound {
                kind,
                id: id.to_string(),
            })
    }

    /// Unpublish a record.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<Record, ModerationError> {
        let removed = self
            .directory
            .remove(kind, id)
            .ok_or_else(|| ModerationError::RecordNotFound {
                kind,
                id: id.to_string(),
            })?;
        tracing::info!(kind = %kind, id, "record deleted");
        Ok(removed)
    }

    /// One page of published records.
    pub fn list(&self, kind: EntityKind, query: &ListQuery) -> Page {
        let category = query.category();
        let limit = query.limit();
        let offset = query.offset();
        let (total, results) = self
            .directory
            .query(kind, category.as_deref(), offset, limit);
        Page {
            results,
            meta: PageMeta::new(kind, total, limit, offset, category),
        }
    }

    /// Number of submissions awaiting moderation.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn find_pending(&self, kind: EntityKind, pending_id: &str) -> Result<PendingEntry, ModerationError> {
        let not_found = || ModerationError::PendingNotFound {
            kind,
            id: pending_id.to_string(),
        };
        let id = PendingId::parse(pending_id).map_err(|_| not_found())?;
        self.pending
            .get(&id)
            .filter(|entry| entry.kind == kind)
            .ok_or_else(not_found)
    }

    fn take_pending(&self, kind: EntityKind, pending_id: &str) -> Result<PendingEntry, ModerationError> {
        let entry = self.find_pending(kind, pending_id)?;
        // A concurrent decision may have taken it since the lookup.
        self.pending
            .remove(&entry.id)
            .ok_or_else(|| ModerationError::PendingNotFound {
                kind,
                id: pending_id.to_string(),
            })
    }
}
