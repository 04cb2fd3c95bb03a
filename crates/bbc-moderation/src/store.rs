//! # Record Stores
//!
//! Two collections back the workflow: the canonical directory (one record
//! per identifier per kind) and the pending queue. Both sit behind traits
//! so a durable backend can replace the in-memory ones shipped here.
//!
//! The in-memory stores use `parking_lot::RwLock` and never hold a guard
//! across an `.await`. Every trait method runs under a single lock
//! acquisition, so an upsert can never leave two canonical records with
//! one identifier.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use bbc_core::{Identifier, PendingId, Record};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::kind::EntityKind;
use crate::pending::PendingEntry;

/// Field the directory listing filters on.
pub const CATEGORY_FIELD: &str = "category";

/// Outcome of writing a canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// An approved record with the same identifier was replaced in place.
    Replaced,
}

/// Canonical (approved) records, keyed by kind and identifier.
pub trait DirectoryStore: Send + Sync {
    fn get(&self, kind: EntityKind, id: &str) -> Option<Record>;

    /// Insert, or replace the record already published under `id`.
    fn upsert(&self, kind: EntityKind, id: Identifier, record: Record) -> Upsert;

    fn remove(&self, kind: EntityKind, id: &str) -> Option<Record>;

    /// Total matching records and one window of them, ordered by identifier.
    fn query(
        &self,
        kind: EntityKind,
        category: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> (usize, Vec<Record>);
}

/// Submissions awaiting moderation.
pub trait PendingStore: Send + Sync {
    fn insert(&self, entry: PendingEntry);
    fn get(&self, id: &PendingId) -> Option<PendingEntry>;
    fn remove(&self, id: &PendingId) -> Option<PendingEntry>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct Canonical {
    /// Store-internal key, stable across replacements.
    internal_id: Uuid,
    record: Record,
}

/// In-memory [`DirectoryStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    data: Arc<RwLock<HashMap<EntityKind, BTreeMap<Identifier, Canonical>>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store-internal key of a published record.
    pub fn internal_id(&self, kind: EntityKind, id: &str) -> Option<Uuid> {
        self.data
            .read()
            .get(&kind)
            .and_then(|records| records.get(id))
            .map(|c| c.internal_id)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.data.read().get(&kind).map_or(0, BTreeMap::len)
    }
}

impl DirectoryStore for InMemoryDirectory {
    fn get(&self, kind: EntityKind, id: &str) -> Option<Record> {
        self.data
            .read()
            .get(&kind)
            .and_then(|records| records.get(id))
            .map(|c| c.record.clone())
    }

    fn upsert(&self, kind: EntityKind, id: Identifier, record: Record) -> Upsert {
        let mut guard = self.data.write();
        let records = guard.entry(kind).or_default();
        match records.get_mut(&id) {
            Some(existing) => {
                existing.record = record;
                Upsert::Replaced
            }
            None => {
                records.insert(
                    id,
                    Canonical {
                        internal_id: Uuid::new_v4(),
                        record,
                    },
                );
                Upsert::Inserted
            }
        }
    }

    fn remove(&self, kind: EntityKind, id: &str) -> Option<Record> {
        self.data
            .write()
            .get_mut(&kind)
            .and_then(|records| records.remove(id))
            .map(|c| c.record)
    }

    fn query(
        &self,
        kind: EntityKind,
        category: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> (usize, Vec<Record>) {
        let guard = self.data.read();
        let Some(records) = guard.get(&kind) else {
            return (0, Vec::new());
        };
        let matches = |c: &&Canonical| match category {
            Some(wanted) => c
                .record
                .get(CATEGORY_FIELD)
                .is_some_and(|v| v.to_text() == wanted),
            None => true,
        };
        let total = records.values().filter(matches).count();
        let window = records
            .values()
            .filter(matches)
            .skip(offset)
            .take(limit)
            .map(|c| c.record.clone())
            .collect();
        (total, window)
    }
}

/// In-memory [`PendingStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPending {
    data: Arc<RwLock<HashMap<PendingId, PendingEntry>>>,
}

impl InMemoryPending {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingStore for InMemoryPending {
    fn insert(&self, entry: PendingEntry) {
        self.data.write().insert(entry.id, entry);
    }

    fn get(&self, id: &PendingId) -> Option<PendingEntry> {
        self.data.read().get(id).cloned()
    }

    fn remove(&self, id: &PendingId) -> Option<PendingEntry> {
        self.data.write().remove(id)
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::Submitter;
    use bbc_core::RecordValue;

    fn org(name: &str, category: &str) -> (Identifier, Record) {
        let id = Identifier::derive(name);
        let mut r = Record::new();
        r.insert("organization", RecordValue::text(name));
        r.insert("category", RecordValue::text(category));
        r.insert("id", RecordValue::text(id.as_str()));
        (id, r)
    }

    #[test]
    fn upsert_replaces_in_place_and_keeps_internal_id() {
        let store = InMemoryDirectory::new();
        let (id, first) = org("Acme", "provider");
        assert_eq!(store.upsert(EntityKind::Organization, id.clone(), first), Upsert::Inserted);
        let internal = store.internal_id(EntityKind::Organization, "acme").unwrap();

        let (_, second) = org("ACME", "payer");
        assert_eq!(store.upsert(EntityKind::Organization, id, second), Upsert::Replaced);
        assert_eq!(store.len(EntityKind::Organization), 1);
        assert_eq!(store.internal_id(EntityKind::Organization, "acme"), Some(internal));
        assert_eq!(
            store.get(EntityKind::Organization, "acme").unwrap().get_str("category"),
            Some("payer")
        );
    }

    #[test]
    fn kinds_are_separate_namespaces() {
        let store = InMemoryDirectory::new();
        let (id, record) = org("Acme", "provider");
        store.upsert(EntityKind::Organization, id, record);
        assert!(store.get(EntityKind::App, "acme").is_none());
        assert!(store.remove(EntityKind::App, "acme").is_none());
        assert!(store.remove(EntityKind::Organization, "acme").is_some());
        assert!(store.get(EntityKind::Organization, "acme").is_none());
    }

    #[test]
    fn query_filters_sorts_and_windows() {
        let store = InMemoryDirectory::new();
        for (name, cat) in [("Zed", "payer"), ("Alpha", "payer"), ("Mid", "provider"), ("Beta", "payer")] {
            let (id, r) = org(name, cat);
            store.upsert(EntityKind::Organization, id, r);
        }

        let (total, all) = store.query(EntityKind::Organization, None, 0, 10);
        assert_eq!(total, 4);
        let ids: Vec<_> = all.iter().filter_map(|r| r.get_str("id")).collect();
        assert_eq!(ids, vec!["alpha", "beta", "mid", "zed"]);

        let (total, window) = store.query(EntityKind::Organization, Some("payer"), 1, 1);
        assert_eq!(total, 3);
        assert_eq!(window[0].get_str("id"), Some("beta"));

        assert_eq!(store.query(EntityKind::App, None, 0, 10), (0, vec![]));
    }

    #[test]
    fn pending_queue_round_trip() {
        let queue = InMemoryPending::new();
        let entry = PendingEntry::new(EntityKind::App, Record::new(), Submitter::default());
        let id = entry.id;
        queue.insert(entry.clone());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(&id), Some(entry));
        assert!(queue.remove(&id).is_some());
        assert!(queue.remove(&id).is_none());
        assert!(queue.is_empty());
    }
}
