//! Match rules and value extraction
//!
//! A [`MatchRule`] derives comparable strings from an item: it resolves a
//! path and, for key/value list attributes, projects the selected records.
//! The same extraction runs on the indexed items and on the probe, so both
//! sides of a comparison are derived identically.

use crate::config::ShapePolicy;
use crate::error::{Error, Result};
use crate::path::{display_path, resolve};
use crate::projection::{ListItemKey, project};
use crate::tree::AttributeTree;
use serde::{Deserialize, Serialize};

/// One matching criterion
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRule {
    /// Field names leading to the compared attribute
    pub path: Vec<String>,
    /// Optional projection for key/value list attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item_key: Option<ListItemKey>,
}

/// Raw result of applying a rule's path and projection to one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<'a> {
    /// The subtree found at the rule path
    Tree(&'a AttributeTree),
    /// Values projected out of a key/value list
    Projected(Vec<&'a str>),
}

impl MatchRule {
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            list_item_key: None,
        }
    }

    /// Parse a dot-separated path, e.g. `metadata.name`
    pub fn from_dotted(path: &str) -> Self {
        Self::new(crate::path::parse_path(path))
    }

    pub fn with_list_item_key(mut self, key: ListItemKey) -> Self {
        self.list_item_key = Some(key);
        self
    }

    /// The projection key, if it selects anything
    pub fn projection(&self) -> Option<&ListItemKey> {
        self.list_item_key.as_ref().filter(|key| !key.is_trivial())
    }

    pub fn display_path(&self) -> String {
        display_path(&self.path)
    }

    /// Resolve the rule path and apply the projection, if any
    pub fn extract<'a>(&self, item: &'a AttributeTree) -> Option<Extracted<'a>> {
        let value = resolve(item, &self.path);
        match self.projection() {
            Some(key) => project(key, value).map(Extracted::Projected),
            None => value.map(Extracted::Tree),
        }
    }

    /// Comparable, non-empty strings this rule derives from `item`.
    ///
    /// A scalar yields itself, a projection or a list of strings yields
    /// every element. What happens to other shapes depends on `policy`;
    /// `subject` names the item in errors. Empty strings are always dropped.
    pub fn values<'a>(
        &self,
        item: &'a AttributeTree,
        policy: ShapePolicy,
        subject: &dyn std::fmt::Display,
    ) -> Result<Vec<&'a str>> {
        let values = match self.extract(item) {
            None => Vec::new(),
            Some(Extracted::Projected(values)) => values,
            Some(Extracted::Tree(AttributeTree::String(s))) => vec![s.as_str()],
            Some(Extracted::Tree(AttributeTree::List(elements))) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        AttributeTree::String(s) => values.push(s.as_str()),
                        other if policy == ShapePolicy::Lenient => {
                            tracing::trace!(
                                %subject,
                                path = %self.display_path(),
                                found = other.kind(),
                                "Skipping non-string list element"
                            );
                        }
                        other => {
                            return Err(Error::TypeMismatch {
                                item: subject.to_string(),
                                path: self.display_path(),
                                found: other.kind(),
                            });
                        }
                    }
                }
                values
            }
            Some(Extracted::Tree(other)) => {
                if policy == ShapePolicy::Strict {
                    return Err(Error::UnsupportedShape {
                        item: subject.to_string(),
                        path: self.display_path(),
                        found: other.kind(),
                    });
                }
                tracing::trace!(
                    %subject,
                    path = %self.display_path(),
                    found = other.kind(),
                    "Treating unsupported value as absent"
                );
                Vec::new()
            }
        };

        Ok(values.into_iter().filter(|v| !v.is_empty()).collect())
    }
}
