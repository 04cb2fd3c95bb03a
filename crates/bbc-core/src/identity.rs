//! # Directory Identifiers
//!
//! Two identifier namespaces exist and are kept apart by type:
//!
//! - [`Identifier`]: the public slug of a canonical record, derived from
//!   its designated human-readable field. It is the uniqueness key within
//!   an entity kind.
//! - [`PendingId`]: the opaque key of a submission waiting for review.
//!
//! ## Invariant
//!
//! Identical designated text, modulo case and punctuation, always yields
//! the same [`Identifier`]. Slugs are fixpoints: deriving from an existing
//! slug returns it unchanged.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Slug identifying a canonical record within its entity kind.
///
/// Lower-case ASCII letters and digits separated by single hyphens, never
/// ending with a hyphen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Derive the identifier for a designated field value.
    ///
    /// Trims, lower-cases, collapses every run of characters outside
    /// `[a-z0-9]` into a single `-`, then strips trailing hyphens. Leading
    /// hyphens are kept.
    ///
    /// ```
    /// use bbc_core::Identifier;
    /// assert_eq!(Identifier::derive("Fake App!").as_str(), "fake-app");
    /// ```
    pub fn derive(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        let mut slug = String::with_capacity(lowered.len());
        let mut in_gap = false;
        for ch in lowered.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch);
                in_gap = false;
            } else if !in_gap {
                slug.push('-');
                in_gap = true;
            }
        }
        let keep = slug.trim_end_matches('-').len();
        slug.truncate(keep);
        Self(slug)
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether derivation produced nothing (designated text had no letters or digits).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingId(pub Uuid);

impl PendingId {
    /// Generate a new random pending identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a pending identifier from its textual UUID form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CoreError::InvalidPendingId(s.to_string()))
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PendingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PendingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_strips_trailing_punctuation() {
        assert_eq!(Identifier::derive("Fake App!").as_str(), "fake-app");
    }

    #[test]
    fn derive_collapses_runs_and_trims() {
        assert_eq!(
            Identifier::derive("  Multi   Word--Org ").as_str(),
            "multi-word-org"
        );
    }

    #[test]
    fn derive_keeps_leading_hyphen() {
        assert_eq!(Identifier::derive("!Bang").as_str(), "-bang");
    }

    #[test]
    fn derive_maps_non_ascii_to_hyphen() {
        assert_eq!(Identifier::derive("Café Münster").as_str(), "caf-m-nster");
    }

    #[test]
    fn derive_of_punctuation_only_is_empty() {
        let id = Identifier::derive(" ?! ");
        assert!(id.is_empty());
    }

    #[test]
    fn derive_ignores_case_and_punctuation_differences() {
        assert_eq!(
            Identifier::derive("Another Fake App!"),
            Identifier::derive("another fake-app")
        );
    }

    #[test]
    fn derive_is_a_fixpoint_on_slugs() {
        let slug = Identifier::derive("Health & Wellness, Inc.");
        assert_eq!(slug.as_str(), "health-wellness-inc");
        assert_eq!(Identifier::derive(slug.as_str()), slug);
    }

    #[test]
    fn identifier_serializes_as_plain_string() {
        let id = Identifier::derive("Fake App");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"fake-app\"");
    }

    #[test]
    fn pending_id_parse_roundtrip() {
        let id = PendingId::new();
        let parsed = PendingId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn pending_id_rejects_garbage() {
        assert!(matches!(
            PendingId::parse("012345678910"),
            Err(CoreError::InvalidPendingId(_))
        ));
    }
}
