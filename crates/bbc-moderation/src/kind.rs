//! # Entity Kinds
//!
//! The directory holds two kinds of entity. Each kind has a schema, a
//! designated field from which identifiers are derived, and a path segment
//! used on the wire (`apps`, `organizations`).

use std::fmt;
use std::str::FromStr;

use bbc_schema::{Field, APP_FIELDS, ORGANIZATION_FIELDS};
use serde::{Deserialize, Serialize};

use crate::error::ModerationError;

/// A directory entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "apps")]
    App,
    #[serde(rename = "organizations")]
    Organization,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::App, EntityKind::Organization];

    /// Wire name and URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "apps",
            Self::Organization => "organizations",
        }
    }

    /// Field whose text the identifier is derived from.
    pub fn designated_field(&self) -> &'static str {
        match self {
            Self::App => "name",
            Self::Organization => "organization",
        }
    }

    /// Top-level fields of this kind's schema.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::App => APP_FIELDS,
            Self::Organization => ORGANIZATION_FIELDS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apps" => Ok(Self::App),
            "organizations" => Ok(Self::Organization),
            other => Err(ModerationError::UnknownKind(other.to_string())),
        }
    }
}
