//! # Record Diffs
//!
//! Compares a proposed record against the approved record it would replace.
//! Values are compared by their flattened text, so `2` and `"2"` are equal.
//!
//! Row order: proposed paths in insertion order first, then any paths the
//! proposal would drop, in the existing record's order.

use bbc_core::Record;
use serde::Serialize;

use crate::flatten::flatten;

/// One line of a moderation review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    /// Dotted field path.
    pub path: String,
    /// Text currently approved at this path, if any.
    pub existing: Option<String>,
    /// Text the proposal would store at this path, if any.
    pub proposed: Option<String>,
}

/// How a row changes the approved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    /// The path is new.
    Added,
    /// The path exists with different text.
    Modified,
    /// The proposal lacks a path the approved record has.
    Removed,
}

impl Change {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

impl DiffRow {
    pub fn change(&self) -> Change {
        match (&self.existing, &self.proposed) {
            (None, _) => Change::Added,
            (Some(_), None) => Change::Removed,
            (Some(_), Some(_)) => Change::Modified,
        }
    }
}

/// Diff `proposed` against `existing`.
///
/// With no existing record every proposed leaf is reported. Otherwise only
/// leaves whose text differs, followed by leaves the proposal would drop.
pub fn diff(proposed: &Record, existing: Option<&Record>) -> Vec<DiffRow> {
    let proposed = flatten(proposed);

    let Some(existing) = existing else {
        return proposed
            .into_iter()
            .map(|(path, text)| DiffRow {
                path,
                existing: None,
                proposed: Some(text),
            })
            .collect();
    };
    let existing = flatten(existing);

    let mut rows: Vec<DiffRow> = proposed
        .iter()
        .filter_map(|(path, text)| match existing.get(path) {
            Some(current) if current == text => None,
            current => Some(DiffRow {
                path: path.clone(),
                existing: current.cloned(),
                proposed: Some(text.clone()),
            }),
        })
        .collect();

    rows.extend(
        existing
            .into_iter()
            .filter(|(path, _)| !proposed.contains_key(path))
            .map(|(path, text)| DiffRow {
                path,
                existing: Some(text),
                proposed: None,
            }),
    );
    rows
}
