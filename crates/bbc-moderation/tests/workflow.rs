//! Integration test: the full submit → review → approve/reject cycle
//! against the in-memory stores, including concurrent moderation.

use std::sync::Arc;
use std::thread;

use bbc_moderation::{
    EntityKind, InMemoryDirectory, InMemoryPending, ListQuery, LogNotifier, ModerationError,
    Moderator, Upsert,
};
use serde_json::json;

fn moderator() -> (Moderator, InMemoryDirectory) {
    let directory = InMemoryDirectory::new();
    let m = Moderator::new(
        Arc::new(directory.clone()),
        Arc::new(InMemoryPending::new()),
        Arc::new(LogNotifier::new(Some("moderators@example.org".into()))),
        "http://localhost:5000",
    );
    (m, directory)
}

fn org(name: &str, category: &str) -> serde_json::Value {
    json!({
        "organization": name,
        "category": category,
        "states": ["WA", "OR"],
        "url": {"web": "https://example.org", "evil": "x"},
        "view": {"allergies": "true"},
        "submitter_email": "someone@example.org"
    })
}

fn publish(m: &Moderator, input: serde_json::Value) {
    let entry = m.submit(EntityKind::Organization, &input).unwrap();
    m.approve(EntityKind::Organization, &entry.id.to_string()).unwrap();
}

#[test]
fn reapproval_preserves_the_internal_id() {
    let (m, directory) = moderator();
    publish(&m, org("Acme Health", "provider"));
    let internal = directory.internal_id(EntityKind::Organization, "acme-health").unwrap();

    publish(&m, org("ACME health!", "payer"));
    assert_eq!(directory.len(EntityKind::Organization), 1);
    assert_eq!(directory.internal_id(EntityKind::Organization, "acme-health"), Some(internal));

    let record = m.get(EntityKind::Organization, "acme-health").unwrap();
    assert_eq!(record.get_str("category"), Some("payer"));
    assert_eq!(record.get_str("organization"), Some("ACME health!"));
}

#[test]
fn published_organization_is_whitelisted_and_typed() {
    let (m, _) = moderator();
    publish(&m, org("Acme", "provider"));
    let json = m.get(EntityKind::Organization, "acme").unwrap().to_json();

    assert_eq!(json["states"], json!(["WA", "OR"]));
    assert_eq!(json["view"]["allergies"], json!(true));
    assert_eq!(json["view"]["vitals"], json!(false));
    assert!(json["url"].get("evil").is_none());
    assert!(json.get("submitter_email").is_none());
}

#[test]
fn listing_pages_through_a_category() {
    let (m, _) = moderator();
    for i in 0..7 {
        publish(&m, org(&format!("Clinic {i}"), "provider"));
    }
    publish(&m, org("Insurer", "payer"));

    let query = ListQuery {
        category: Some("Provider".into()),
        limit: Some("3".into()),
        offset: Some("3".into()),
    };
    let page = m.list(EntityKind::Organization, &query);
    assert_eq!(page.meta.total_results, 7);
    assert_eq!(page.meta.category.as_deref(), Some("provider"));
    let ids: Vec<_> = page.results.iter().filter_map(|r| r.get_str("id")).collect();
    assert_eq!(ids, vec!["clinic-3", "clinic-4", "clinic-5"]);
    assert_eq!(
        page.meta.next.as_deref(),
        Some("/organizations?limit=3&offset=6&category=provider")
    );
    assert_eq!(
        page.meta.prev.as_deref(),
        Some("/organizations?limit=3&offset=0&category=provider")
    );
}

#[test]
fn concurrent_decisions_resolve_exactly_once() {
    let (m, directory) = moderator();
    let entry = m.submit(EntityKind::Organization, &org("Race", "provider")).unwrap();
    let id = entry.id.to_string();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let m = m.clone();
            let id = id.clone();
            thread::spawn(move || {
                if i % 2 == 0 {
                    m.approve(EntityKind::Organization, &id).map(|_| ())
                } else {
                    m.reject(EntityKind::Organization, &id).map(|_| ())
                }
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, ModerationError::PendingNotFound { .. })));
    assert_eq!(m.pending_count(), 0);
    assert!(directory.len(EntityKind::Organization) <= 1);
}

#[test]
fn double_submission_creates_independent_entries() {
    let (m, _) = moderator();
    let a = m.submit(EntityKind::App, &json!({"name": "Twin"})).unwrap();
    let b = m.submit(EntityKind::App, &json!({"name": "Twin"})).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(m.pending_count(), 2);

    let first = m.approve(EntityKind::App, &a.id.to_string()).unwrap();
    let second = m.approve(EntityKind::App, &b.id.to_string()).unwrap();
    assert_eq!(first.outcome, Upsert::Inserted);
    assert_eq!(second.outcome, Upsert::Replaced);
}
