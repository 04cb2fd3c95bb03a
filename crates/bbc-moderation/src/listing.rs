//! # Directory Listing
//!
//! Paged reads of canonical records. Query parameters are parsed leniently:
//! unparseable numbers fall back to their defaults rather than failing the
//! request.

use bbc_core::Record;
use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;

pub const DEFAULT_LIMIT: usize = 30;
pub const MAX_LIMIT: usize = 100;

/// Raw listing parameters as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    /// Sanitized category filter, if any.
    pub fn category(&self) -> Option<String> {
        self.category.as_deref().and_then(sanitize_category)
    }

    /// Page size: default 30, capped at 100. Zero or negative means default.
    pub fn limit(&self) -> usize {
        match self.limit.as_deref().and_then(parse_leading_int) {
            Some(n) if n > 0 => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
            _ => DEFAULT_LIMIT,
        }
    }

    /// Records to skip. Negative means zero.
    pub fn offset(&self) -> usize {
        self.offset
            .as_deref()
            .and_then(parse_leading_int)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }
}

/// Normalize a category filter: drop the first run of non-letter characters,
/// then lower-case. Only the first run is removed, so `"a-b-c"` becomes
/// `"ab-c"`. Returns `None` when nothing is left.
pub fn sanitize_category(raw: &str) -> Option<String> {
    let is_letter = |c: char| c.is_ascii_alphabetic();
    let cleaned = match raw.find(|c: char| !is_letter(c)) {
        Some(start) => {
            let rest = &raw[start..];
            let end = rest.find(is_letter).map_or(raw.len(), |n| start + n);
            format!("{}{}", &raw[..start], &raw[end..])
        }
        None => raw.to_string(),
    };
    let lowered = cleaned.to_lowercase();
    (!lowered.is_empty()).then_some(lowered)
}

/// Base-10 integer from the leading digits of `s`, like a lenient form parser.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_results: usize,
    pub limit: usize,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl PageMeta {
    /// Compute metadata, including relative `next`/`prev` links.
    pub fn new(
        kind: EntityKind,
        total_results: usize,
        limit: usize,
        offset: usize,
        category: Option<String>,
    ) -> Self {
        let link = |at: usize| {
            let mut href = format!("/{kind}?limit={limit}&offset={at}");
            if let Some(c) = &category {
                href.push_str("&category=");
                href.push_str(c);
            }
            href
        };
        let next = (offset.saturating_add(limit) < total_results).then(|| link(offset + limit));
        let prev = (offset > 0).then(|| link(offset.saturating_sub(limit)));
        Self {
            total_results,
            limit,
            offset,
            category,
            next,
            prev,
        }
    }
}

/// One page of canonical records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub results: Vec<Record>,
    pub meta: PageMeta,
}
