//! Schema-less attribute trees
//!
//! An [`AttributeTree`] is the generic body of one configuration item as it
//! comes out of the document parsing stage. Only three shapes exist: scalar
//! strings, ordered lists and string-keyed mappings.
//!
//! # Examples
//!
//! ```
//! use topo_match::AttributeTree;
//! use serde_json::json;
//!
//! let tree = AttributeTree::try_from(json!({"name": "web", "replicas": 3})).unwrap();
//! assert_eq!(tree.get("name").and_then(AttributeTree::as_str), Some("web"));
//! assert_eq!(tree.get("replicas").and_then(AttributeTree::as_str), Some("3"));
//! ```

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Generic, immutable value tree describing one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeTree {
    /// A scalar leaf
    String(String),
    /// An ordered list of subtrees
    List(Vec<AttributeTree>),
    /// A string-keyed mapping of subtrees
    Mapping(BTreeMap<String, AttributeTree>),
}

impl AttributeTree {
    /// Name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeTree]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, AttributeTree>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of a mapping node; `None` for every other shape
    pub fn get(&self, field: &str) -> Option<&AttributeTree> {
        self.as_mapping()?.get(field)
    }

    /// Convert a JSON value, dropping `null` fields and elements.
    ///
    /// Numbers and booleans become their canonical textual form. Returns
    /// `None` only when the value itself is `null`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::String(b.to_string())),
            Value::Number(n) => Some(Self::String(n.to_string())),
            Value::String(s) => Some(Self::String(s)),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Mapping(
                map.into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|tree| (k, tree)))
                    .collect(),
            )),
        }
    }
}

/// An empty mapping: an item with no attributes
impl Default for AttributeTree {
    fn default() -> Self {
        Self::Mapping(BTreeMap::new())
    }
}

impl TryFrom<Value> for AttributeTree {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value).ok_or(Error::NullDocument)
    }
}

impl<'de> Deserialize<'de> for AttributeTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for AttributeTree {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeTree {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<AttributeTree>> From<Vec<T>> for AttributeTree {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
