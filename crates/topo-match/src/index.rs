//! Value indexes over a candidate set
//!
//! For one rule, [`build_index`] groups the current candidates by the
//! values the rule derives from them and returns the groups as a sorted
//! list of [`IndexEntry`] records. Sorting is byte-wise on the value, so the
//! same candidates and rule always produce the same sequence, and
//! [`lookup`] can binary-search it.
//!
//! An item whose attribute is multi-valued appears under every one of its
//! values.

use crate::env::MatchProcessingEnv;
use crate::error::{Error, Result};
use crate::item::ItemId;
use crate::rule::MatchRule;
use serde::Serialize;
use std::collections::HashMap;

/// Transient grouping of item ids by extracted value
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    groups: HashMap<String, Vec<ItemId>>,
}

impl ValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `value`.
    ///
    /// Empty values are ignored. All values of one item must be added
    /// before moving on to the next item: an id is kept once per value only
    /// when its adds are grouped together, as [`build_index`] does.
    pub fn add(&mut self, value: &str, id: ItemId) {
        if value.is_empty() {
            return;
        }

        let ids = self.groups.entry(value.to_string()).or_default();
        if ids.last() != Some(&id) {
            ids.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One distinct value and every candidate that carries it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub value: String,
    /// Ids in candidate-set order
    pub ids: Vec<ItemId>,
}

/// Flatten an index into entries sorted by value
pub fn flatten_sorted(index: ValueIndex) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = index
        .groups
        .into_iter()
        .map(|(value, ids)| IndexEntry { value, ids })
        .collect();

    // Keys are distinct, so an unstable sort is still deterministic
    entries.sort_unstable_by(|a, b| a.value.as_bytes().cmp(b.value.as_bytes()));
    entries
}

/// Build the sorted index of `rule` over the env's current candidates.
///
/// Items where the rule finds nothing are left out. Fails when an item has
/// a value shape the env's [`ShapePolicy`](crate::ShapePolicy) rejects; the
/// index for the rule is then abandoned as a whole.
pub fn build_index(rule: &MatchRule, env: &MatchProcessingEnv<'_>) -> Result<Vec<IndexEntry>> {
    let raw = env.raw();
    let policy = env.options().shape_policy;
    let mut index = ValueIndex::new();

    for id in env.current() {
        let item = raw.get(id).ok_or(Error::UnknownItem { id, len: raw.len() })?;
        for value in rule.values(item, policy, &id)? {
            index.add(value, id);
        }
    }

    let entries = flatten_sorted(index);
    tracing::debug!(
        path = %rule.display_path(),
        candidates = env.current().len(),
        entries = entries.len(),
        "Built value index"
    );

    Ok(entries)
}

/// Find the entry for `value` in a sorted index
pub fn lookup<'a>(entries: &'a [IndexEntry], value: &str) -> Option<&'a IndexEntry> {
    entries
        .binary_search_by(|entry| entry.value.as_bytes().cmp(value.as_bytes()))
        .ok()
        .map(|pos| &entries[pos])
}
