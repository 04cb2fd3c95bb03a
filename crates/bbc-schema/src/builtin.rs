//! # Built-in Entity Schemas
//!
//! The two directory entity kinds. Field names and order are a wire
//! contract with existing clients; do not rename or reorder without
//! migrating stored records.

use crate::schema::{DataType, Field, SchemaNode};

const STRING: SchemaNode = SchemaNode::Leaf(DataType::String);
const BOOLEAN: SchemaNode = SchemaNode::Leaf(DataType::Boolean);
const ARRAY: SchemaNode = SchemaNode::Leaf(DataType::Array);

/// Fields of an app listing. Flat.
pub const APP_FIELDS: &[Field] = &[
    ("name", STRING),
    ("organization", STRING),
    ("url", STRING),
    ("description", STRING),
    ("img", STRING),
    ("apple_url", STRING),
    ("google_url", STRING),
];

/// Schema of an app listing.
pub static APP: SchemaNode = SchemaNode::Group(APP_FIELDS);

const ORGANIZATION_URL: &[Field] = &[
    ("login", STRING),
    ("logo", STRING),
    ("mobile", STRING),
    ("screenshot", STRING),
    ("web", STRING),
];

const ORGANIZATION_VIEW: &[Field] = &[
    ("active_prescriptions", BOOLEAN),
    ("allergies", BOOLEAN),
    ("appointment_history", BOOLEAN),
    ("claims", BOOLEAN),
    ("diagnostics", BOOLEAN),
    ("family_history", BOOLEAN),
    ("imaging", BOOLEAN),
    ("immunizations", BOOLEAN),
    ("lab_results", BOOLEAN),
    ("medical_history", BOOLEAN),
    ("medications", BOOLEAN),
    ("pathology", BOOLEAN),
    ("prescriptions", BOOLEAN),
    ("problems", BOOLEAN),
    ("visit_history", BOOLEAN),
    ("vitals", BOOLEAN),
];

const ORGANIZATION_DOWNLOAD: &[Field] = &[
    ("text", BOOLEAN),
    ("pdf", BOOLEAN),
    ("c32", BOOLEAN),
    ("ccda", BOOLEAN),
    ("other", BOOLEAN),
];

const TRUST_BUNDLES: &[Field] = &[
    ("patient", BOOLEAN),
    ("provider", BOOLEAN),
    ("other", BOOLEAN),
];

const DIRECT_TRANSMIT: &[Field] = &[
    ("enabled", BOOLEAN),
    ("trust_bundles", SchemaNode::Group(TRUST_BUNDLES)),
];

const ORGANIZATION_TRANSMIT: &[Field] = &[("direct", SchemaNode::Group(DIRECT_TRANSMIT))];

const ORGANIZATION_SERVICES: &[Field] = &[
    ("refills", BOOLEAN),
    ("automatic_refills", BOOLEAN),
    ("transfer_prescriptions", BOOLEAN),
    ("bill_pay", BOOLEAN),
    ("caregiving", BOOLEAN),
    ("dispute", BOOLEAN),
    ("family_prescriptions", BOOLEAN),
    ("new_prescriptions", BOOLEAN),
    ("open_notes", BOOLEAN),
    ("reminders", BOOLEAN),
    ("scheduling", BOOLEAN),
    ("search", BOOLEAN),
    ("secure_messaging", BOOLEAN),
    ("self_entered", BOOLEAN),
    ("shop", BOOLEAN),
    ("test_request", BOOLEAN),
    ("email_alerts", BOOLEAN),
];

/// Fields of an organization listing.
pub const ORGANIZATION_FIELDS: &[Field] = &[
    ("organization", STRING),
    ("category", STRING),
    ("states", ARRAY),
    ("phone", STRING),
    ("url", SchemaNode::Group(ORGANIZATION_URL)),
    ("description", STRING),
    ("bb_logo", BOOLEAN),
    ("view", SchemaNode::Group(ORGANIZATION_VIEW)),
    ("download", SchemaNode::Group(ORGANIZATION_DOWNLOAD)),
    ("transmit", SchemaNode::Group(ORGANIZATION_TRANSMIT)),
    ("services", SchemaNode::Group(ORGANIZATION_SERVICES)),
];

/// Schema of an organization listing.
pub static ORGANIZATION: SchemaNode = SchemaNode::Group(ORGANIZATION_FIELDS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_is_flat() {
        assert_eq!(APP.leaf_paths().len(), 7);
        assert!(APP_FIELDS
            .iter()
            .all(|(_, node)| matches!(node, SchemaNode::Leaf(DataType::String))));
    }

    #[test]
    fn organization_flag_counts() {
        let count = |name: &str| match ORGANIZATION.child(name) {
            Some(SchemaNode::Group(fields)) => fields.len(),
            _ => 0,
        };
        assert_eq!(count("view"), 16);
        assert_eq!(count("download"), 5);
        assert_eq!(count("services"), 17);
        assert_eq!(count("url"), 5);
    }

    #[test]
    fn organization_transmit_is_nested_three_deep() {
        let paths = ORGANIZATION.leaf_paths();
        assert!(paths.contains(&"transmit.direct.enabled".to_string()));
        assert!(paths.contains(&"transmit.direct.trust_bundles.provider".to_string()));
    }
}
