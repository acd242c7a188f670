//! Item collection and candidate sets
//!
//! Items live in an append-only [`RawMatchList`]; an [`ItemId`] is the
//! item's position and stays valid for the whole session. A
//! [`CandidateSet`] is the ordered set of ids still in play.

use crate::error::{Error, Result};
use crate::tree::AttributeTree;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Stable handle of an item inside a [`RawMatchList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(usize);

impl ItemId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for ItemId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Ordered, append-only collection of items
///
/// The collection is shared read-only by every matching session built on
/// top of it. Items can be added while assembling the list but never
/// removed, so ids are never reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMatchList {
    items: Vec<AttributeTree>,
}

impl RawMatchList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its id
    pub fn push(&mut self, item: AttributeTree) -> ItemId {
        let id = ItemId(self.items.len());
        self.items.push(item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&AttributeTree> {
        self.items.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.0 < self.items.len()
    }

    /// All ids in collection order
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.items.len()).map(ItemId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &AttributeTree)> {
        self.items.iter().enumerate().map(|(i, item)| (ItemId(i), item))
    }

    /// Build a collection from a JSON array document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Build a collection from a YAML sequence document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Load a collection from disk; `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(Error::NotAList {
                    found: json_kind(&other),
                });
            }
        };
        // Null entries still occupy a slot so ids match document positions
        Ok(items
            .into_iter()
            .map(|v| AttributeTree::from_json(v).unwrap_or_default())
            .collect())
    }
}

impl FromIterator<AttributeTree> for RawMatchList {
    fn from_iter<I: IntoIterator<Item = AttributeTree>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Ordered set of candidate item ids
///
/// Iteration follows insertion order, which makes the id order inside
/// every index entry reproducible.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every id of the collection, in collection order
    pub fn all(list: &RawMatchList) -> Self {
        list.ids().collect()
    }

    /// Insert an id; returns `false` if it was already present
    pub fn insert(&mut self, id: ItemId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.order
    }

    /// Keep only the ids accepted by `keep`, preserving order
    pub fn retain_into(&self, mut keep: impl FnMut(ItemId) -> bool) -> Self {
        self.iter().filter(|&id| keep(id)).collect()
    }
}

impl PartialEq for CandidateSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for CandidateSet {}

impl FromIterator<ItemId> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = ItemId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ItemId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(raw: &[usize]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    #[test]
    fn test_push_assigns_positional_ids() {
        let mut list = RawMatchList::new();
        let a = list.push(AttributeTree::from("a"));
        let b = list.push(AttributeTree::from("b"));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(list.get(b), Some(&AttributeTree::from("b")));
        assert_eq!(list.get(ItemId::new(2)), None);
    }

    #[test]
    fn test_candidate_set_keeps_insertion_order() {
        let set: CandidateSet = ids(&[2, 0, 2, 1]).into_iter().collect();
        assert_eq!(set.as_slice(), ids(&[2, 0, 1]).as_slice());
        assert!(set.contains(ItemId::new(0)));
        assert!(!set.contains(ItemId::new(3)));
    }

    #[test]
    fn test_retain_into_preserves_order() {
        let set: CandidateSet = ids(&[3, 1, 2]).into_iter().collect();
        let kept = set.retain_into(|id| id.index() != 1);
        assert_eq!(kept.as_slice(), ids(&[3, 2]).as_slice());
    }

    #[test]
    fn test_from_json_array() {
        let list = RawMatchList::from_json_str(r#"[{"name": "A"}, null, {"name": "B"}]"#).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(ItemId::new(1)), Some(&AttributeTree::default()));
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        let err = RawMatchList::from_json_str(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(err, Error::NotAList { found: "mapping" }));
    }

    #[test]
    fn test_display_item_id() {
        assert_eq!(ItemId::new(7).to_string(), "#7");
    }
}
