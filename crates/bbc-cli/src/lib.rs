//! # bbc-cli — Offline Directory Tooling
//!
//! ## Subcommands
//!
//! - `bbc coerce --kind apps [FILE]`: whitelist and coerce a submission.
//! - `bbc diff PROPOSED [EXISTING]`: field-level review table.
//! - `bbc slug TEXT`: identifier derivation.
//!
//! Inputs are JSON files; `-` or an omitted path reads stdin.
//!
//! Exit codes: 0 on success, 1 when the input is rejected, 2 on an
//! operational error (unreadable file, malformed JSON).

pub mod coerce;
pub mod diff;
pub mod slug;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a JSON document from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_json(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(p) if p != Path::new("-") => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse JSON: {}", p.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            serde_json::from_str(&content).context("failed to parse JSON from stdin")
        }
    }
}
