//! # Coerce Subcommand
//!
//! Runs a submission through the same pipeline the API uses before queueing
//! it: designated-field check, schema coercion, identifier derivation, and
//! the `updated` stamp. Prints the candidate record as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use bbc_core::{Record, Timestamp, LAST_MODIFIED_FIELD};
use bbc_moderation::{EntityKind, ModerationError};

/// Arguments for the `bbc coerce` subcommand.
#[derive(Args, Debug)]
pub struct CoerceArgs {
    /// Entity kind: `apps` or `organizations`.
    #[arg(long, short)]
    pub kind: EntityKind,

    /// Submission JSON. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pin the `updated` stamp (RFC 3339, `Z` suffix) for reproducible
    /// output. A submission that carries its own `updated` keeps it.
    #[arg(long, value_parser = parse_timestamp)]
    pub updated: Option<Timestamp>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the coerce subcommand.
///
/// Returns exit code 0 when a candidate was produced, 1 when the submission
/// lacks its designated field.
pub fn run_coerce(args: &CoerceArgs) -> Result<u8> {
    let mut input = crate::read_json(args.input.as_deref())?;
    if let (Some(stamp), Some(object)) = (args.updated, input.as_object_mut()) {
        object
            .entry(LAST_MODIFIED_FIELD)
            .or_insert_with(|| Value::String(stamp.to_iso8601()));
    }
    match candidate(args.kind, &input) {
        Ok(record) => {
            println!("{}", render(&record, args.compact)?);
            Ok(0)
        }
        Err(e @ ModerationError::MissingField { .. }) => {
            tracing::error!(kind = %args.kind, "{e}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build the candidate record for `input`.
pub fn candidate(kind: EntityKind, input: &Value) -> Result<Record, ModerationError> {
    let record = bbc_moderation::create(kind, input)?;
    tracing::debug!(kind = %kind, fields = record.len(), "coerced submission");
    Ok(record)
}

fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    Timestamp::parse(s).map_err(|e| e.to_string())
}

fn render(record: &Record, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(record)
    } else {
        serde_json::to_string_pretty(record)
    };
    text.context("failed to serialize record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_whitelists_and_stamps() {
        let record = candidate(
            EntityKind::App,
            &json!({"name": " Fake App! ", "bad_property": "x", "updated": "2014-01-01"}),
        )
        .unwrap();
        assert_eq!(record.get_str("name"), Some("Fake App!"));
        assert_eq!(record.get_str("id"), Some("fake-app"));
        assert_eq!(record.get_str("updated"), Some("2014-01-01"));
        assert!(!record.contains_key("bad_property"));
    }

    #[test]
    fn candidate_requires_designated_field() {
        let err = candidate(EntityKind::Organization, &json!({"name": "wrong field"})).unwrap_err();
        assert!(matches!(err, ModerationError::MissingField { field: "organization", .. }));
    }

    #[test]
    fn render_keeps_schema_order() {
        let record = candidate(EntityKind::App, &json!({"name": "A"})).unwrap();
        let text = render(&record, true).unwrap();
        let name = text.find("\"name\"").unwrap();
        let url = text.find("\"url\"").unwrap();
        let id = text.find("\"id\"").unwrap();
        assert!(name < url && url < id);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn timestamp_flag_requires_utc() {
        assert_eq!(
            parse_timestamp("2026-01-15T12:00:00Z").unwrap().to_iso8601(),
            "2026-01-15T12:00:00Z"
        );
        assert!(parse_timestamp("2026-01-15T12:00:00+01:00").is_err());
    }

    #[test]
    fn run_coerce_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"organization": "Acme Health"}"#).unwrap();
        std::fs::write(&bad, r#"{"organization": "   "}"#).unwrap();

        let args = |input: PathBuf| CoerceArgs {
            kind: EntityKind::Organization,
            input: Some(input),
            updated: None,
            compact: true,
        };
        assert_eq!(run_coerce(&args(good)).unwrap(), 0);
        assert_eq!(run_coerce(&args(bad)).unwrap(), 1);
        assert!(run_coerce(&args(dir.path().join("missing.json"))).is_err());
    }
}
