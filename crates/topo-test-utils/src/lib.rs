//! Shared test utilities for the topology-sync workspace.
//!
//! Builds item collections, probes and rules from terse literals so test
//! suites can focus on matching behaviour. Dev-dependency only; never
//! published.

use serde_json::Value;
use std::path::{Path, PathBuf};
use topo_match::{AttributeTree, ItemId, ListItemKey, MatchConfig, MatchRule, RawMatchList};

/// Build an item collection from a JSON array literal
///
/// # Panics
///
/// Panics if `items` is not an array.
pub fn items(items: Value) -> RawMatchList {
    RawMatchList::from_json_str(&items.to_string()).expect("fixture items must be a JSON array")
}

/// Build a single attribute tree from a JSON literal
pub fn tree(value: Value) -> AttributeTree {
    AttributeTree::try_from(value).expect("fixture tree must not be null")
}

/// Rule on a dot-separated path
pub fn rule(path: &str) -> MatchRule {
    MatchRule::from_dotted(path)
}

/// Rule projecting `value` out of `{key, value}` records whose `key` equals `key`
pub fn tag_rule(path: &str, key: &str) -> MatchRule {
    MatchRule::from_dotted(path).with_list_item_key(ListItemKey::new("key", key, "value"))
}

pub fn ids(raw: &[usize]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::new).collect()
}

/// Root of the workspace `test-fixtures` directory
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

/// A source/target pair of environments plus the rules that correlate them
pub struct EnvironmentPair {
    pub source: RawMatchList,
    pub target: RawMatchList,
    pub config: MatchConfig,
}

/// Load `test-fixtures/environments/<name>/{source,target}.{json,yaml}` and
/// its `rules.toml`
pub fn environment_pair(name: &str) -> EnvironmentPair {
    let dir = fixtures_dir().join("environments").join(name);
    let load = |stem: &str| {
        let json = dir.join(format!("{stem}.json"));
        let path = if json.exists() {
            json
        } else {
            dir.join(format!("{stem}.yaml"))
        };
        RawMatchList::load(&path)
            .unwrap_or_else(|e| panic!("failed to load fixture {}: {e}", path.display()))
    };

    EnvironmentPair {
        source: load("source"),
        target: load("target"),
        config: MatchConfig::load(dir.join("rules.toml")).expect("fixture rules must parse"),
    }
}
