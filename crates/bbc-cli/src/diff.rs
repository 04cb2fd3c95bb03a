//! # Diff Subcommand
//!
//! Prints the review table a moderator would see for a proposal: every
//! field when there is no existing record, otherwise only the fields whose
//! text differs, plus fields the proposal would drop.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use bbc_core::Record;
use bbc_moderation::EntityKind;
use bbc_review::DiffRow;

/// Placeholder for a value missing on one side.
const ABSENT: &str = "-";

/// Arguments for the `bbc diff` subcommand.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Proposed record (JSON).
    #[arg(value_name = "PROPOSED")]
    pub proposed: PathBuf,

    /// Currently published record (JSON). Omit for a new entity.
    #[arg(value_name = "EXISTING")]
    pub existing: Option<PathBuf>,

    /// Coerce both sides with this kind's schema before comparing.
    #[arg(long, short)]
    pub kind: Option<EntityKind>,

    /// Emit the rows as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the diff subcommand. Always exits 0 once both inputs load.
pub fn run_diff(args: &DiffArgs) -> Result<u8> {
    let proposed = load(&args.proposed, args.kind)?;
    let existing = args
        .existing
        .as_ref()
        .map(|path| load(path, args.kind))
        .transpose()?;

    let rows = bbc_review::diff(&proposed, existing.as_ref());
    tracing::info!(rows = rows.len(), new = existing.is_none(), "computed diff");

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("failed to serialize diff")?
        );
    } else {
        print!("{}", render_table(&rows, existing.is_some()));
    }
    Ok(0)
}

fn load(path: &Path, kind: Option<EntityKind>) -> Result<Record> {
    let value = crate::read_json(Some(path))?;
    Ok(match kind {
        Some(kind) => bbc_schema::coerce_record(kind.fields(), &value),
        None => Record::from_json(&value),
    })
}

/// Plain-text table. The `existing` column is shown only when comparing
/// against a published record.
pub fn render_table(rows: &[DiffRow], with_existing: bool) -> String {
    if rows.is_empty() {
        return "No differences\n".to_string();
    }

    let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| ABSENT.to_string());
    let mut table: Vec<Vec<String>> = vec![if with_existing {
        vec!["attribute".into(), "existing".into(), "proposed".into()]
    } else {
        vec!["attribute".into(), "proposed".into()]
    }];
    for row in rows {
        let mut line = vec![row.path.clone()];
        if with_existing {
            line.push(cell(&row.existing));
        }
        line.push(cell(&row.proposed));
        table.push(line);
    }

    let columns = table[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| table.iter().map(|line| line[c].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &table {
        let mut text = String::new();
        for (c, value) in line.iter().enumerate() {
            if c + 1 == columns {
                text.push_str(value);
            } else {
                let _ = write!(text, "{value:<width$}  ", width = widths[c]);
            }
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, name: &str, body: serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[test]
    fn table_for_new_entity_has_no_existing_column() {
        let proposed = Record::from_json(&json!({"a": "1", "b": {"c": "2"}}));
        let table = render_table(&bbc_review::diff(&proposed, None), false);
        assert_eq!(table, "attribute  proposed\na          1\nb.c        2\n");
    }

    #[test]
    fn rows_follow_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{"zeta":"1","alpha":"2","mid":{"y":1,"b":2}}"#).unwrap();
        let proposed = load(&path, None).unwrap();
        let rows = bbc_review::diff(&proposed, None);
        let paths: Vec<_> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["zeta", "alpha", "mid.y", "mid.b"]);
        assert_eq!(
            render_table(&rows, false),
            "attribute  proposed\nzeta       1\nalpha      2\nmid.y      1\nmid.b      2\n"
        );
    }

    #[test]
    fn table_marks_dropped_fields() {
        let proposed = Record::from_json(&json!({"a": "1"}));
        let existing = Record::from_json(&json!({"a": "1", "b": "2"}));
        let table = render_table(&bbc_review::diff(&proposed, Some(&existing)), true);
        assert_eq!(table, "attribute  existing  proposed\nb          2         -\n");
    }

    #[test]
    fn table_without_rows() {
        assert_eq!(render_table(&[], true), "No differences\n");
    }

    #[test]
    fn kind_coercion_hides_undeclared_fields() {
        let dir = tempfile::tempdir().unwrap();
        let proposed = write(&dir, "p.json", json!({"name": "A", "evil": "x"}));
        let plain = load(&proposed, None).unwrap();
        let coerced = load(&proposed, Some(EntityKind::App)).unwrap();
        assert!(plain.contains_key("evil"));
        assert!(!coerced.contains_key("evil"));
        assert_eq!(coerced.get_str("apple_url"), Some(""));
    }

    #[test]
    fn run_diff_loads_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        let args = DiffArgs {
            proposed: write(&dir, "p.json", json!({"name": "A"})),
            existing: Some(write(&dir, "e.json", json!({"name": "B"}))),
            kind: Some(EntityKind::App),
            json: true,
        };
        assert_eq!(run_diff(&args).unwrap(), 0);

        let missing = DiffArgs {
            existing: Some(dir.path().join("nope.json")),
            ..args
        };
        assert!(run_diff(&missing).is_err());
    }
}
