//! # Schema Tree
//!
//! A node is either a typed leaf or a group of named children. Every walk
//! over a schema is an exhaustive `match` on the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scalar type declared by a schema leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Boolean,
    Array,
    Integer,
    Number,
}

impl DataType {
    /// Return the string representation of this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "array" => Ok(Self::Array),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            other => Err(format!("unknown data type: {other}")),
        }
    }
}

/// A named child of a group node. Declaration order is output order.
pub type Field = (&'static str, SchemaNode);

/// A node of a schema tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaNode {
    /// A typed scalar (or sequence) field.
    Leaf(DataType),
    /// A nested object with declared children.
    Group(&'static [Field]),
}

impl SchemaNode {
    /// Look up a direct child of a group. Leaves have no children.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(fields) => fields.iter().find(|(n, _)| *n == name).map(|(_, node)| node),
        }
    }

    /// Dotted paths of every leaf under this node, in declaration order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_leaf_paths(self, None, &mut out);
        out
    }
}

fn collect_leaf_paths(node: &SchemaNode, prefix: Option<&str>, out: &mut Vec<String>) {
    match node {
        SchemaNode::Leaf(_) => {
            if let Some(path) = prefix {
                out.push(path.to_string());
            }
        }
        SchemaNode::Group(fields) => {
            for (name, child) in fields.iter() {
                let path = match prefix {
                    Some(p) => format!("{p}.{name}"),
                    None => (*name).to_string(),
                };
                collect_leaf_paths(child, Some(&path), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NESTED: SchemaNode = SchemaNode::Group(&[
        ("a", SchemaNode::Leaf(DataType::String)),
        (
            "b",
            SchemaNode::Group(&[("c", SchemaNode::Leaf(DataType::Integer))]),
        ),
    ]);

    #[test]
    fn data_type_parses_its_own_name() {
        for dt in [
            DataType::String,
            DataType::Boolean,
            DataType::Array,
            DataType::Integer,
            DataType::Number,
        ] {
            assert_eq!(dt.as_str().parse::<DataType>().unwrap(), dt);
        }
        assert!("date".parse::<DataType>().is_err());
    }

    #[test]
    fn leaf_paths_are_dotted_and_ordered() {
        assert_eq!(NESTED.leaf_paths(), vec!["a", "b.c"]);
    }

    #[test]
    fn child_lookup() {
        assert_eq!(NESTED.child("a"), Some(&SchemaNode::Leaf(DataType::String)));
        assert!(NESTED.child("z").is_none());
        assert!(SchemaNode::Leaf(DataType::Boolean).child("a").is_none());
    }
}
