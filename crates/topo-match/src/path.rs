//! Attribute path resolution
//!
//! A path is an ordered list of field names. Resolution descends through
//! mapping nodes only; there is no list indexing.
//!
//! # Examples
//!
//! ```
//! use topo_match::{AttributeTree, path::resolve};
//! use serde_json::json;
//!
//! let item = AttributeTree::try_from(json!({"metadata": {"name": "web"}})).unwrap();
//! assert_eq!(
//!     resolve(&item, &["metadata", "name"]).and_then(AttributeTree::as_str),
//!     Some("web")
//! );
//! assert_eq!(resolve(&item, &["metadata", "missing"]), None);
//! ```

use crate::tree::AttributeTree;

/// Resolve `path` inside `item`.
///
/// Returns `None` for an empty path, when a field is missing, or when an
/// intermediate node is not a mapping. Never fails.
pub fn resolve<'a, S: AsRef<str>>(item: &'a AttributeTree, path: &[S]) -> Option<&'a AttributeTree> {
    if path.is_empty() {
        return None;
    }

    path.iter()
        .try_fold(item, |current, field| current.get(field.as_ref()))
}

/// Render a path for diagnostics, e.g. `spec.metadata.name`
pub fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a dot-separated path into field names, skipping empty segments
pub fn parse_path(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
