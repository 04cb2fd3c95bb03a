//! # Flattened Views
//!
//! A flattened view maps the dotted path of every leaf to its text. Lists
//! are leaves (their text joins elements with `,`); only groups are
//! descended into.

use bbc_core::{Record, RecordValue, BOOKKEEPING_FIELDS};
use indexmap::IndexMap;

/// Separator between field names in a flattened path.
pub const PATH_SEPARATOR: &str = ".";

/// Insertion-ordered `path → text` projection of a record.
pub type FlatView = IndexMap<String, String>;

/// Flatten `record`, excluding bookkeeping fields at every depth.
pub fn flatten(record: &Record) -> FlatView {
    let mut out = FlatView::new();
    flatten_into(record, None, &mut out);
    out
}

fn flatten_into(record: &Record, prefix: Option<&str>, out: &mut FlatView) {
    for (field, value) in record {
        if BOOKKEEPING_FIELDS.contains(&field.as_str()) {
            continue;
        }
        let path = match prefix {
            Some(p) => format!("{p}{PATH_SEPARATOR}{field}"),
            None => field.clone(),
        };
        match value {
            RecordValue::Group(inner) => flatten_into(inner, Some(&path), out),
            leaf => {
                out.insert(path, leaf.to_text());
            }
        }
    }
}
