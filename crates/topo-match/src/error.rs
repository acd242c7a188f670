//! Error types for topo-match

use crate::item::ItemId;

/// Result type for topo-match operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing or narrowing match candidates
///
/// A missing attribute is never an error: it resolves to `None` and the
/// item is simply left out of the rule's index. Shape errors name their
/// subject as an item id (`#3`) or `probe`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A list attribute held a non-string element where strings are required
    #[error("{item}: {found} element in list at '{path}', expected string")]
    TypeMismatch {
        item: String,
        path: String,
        found: &'static str,
    },

    /// The attribute at the rule path has a shape that cannot be indexed
    #[error("{item}: cannot index {found} at '{path}'")]
    UnsupportedShape {
        item: String,
        path: String,
        found: &'static str,
    },

    /// A candidate id lies outside the item collection
    #[error("Unknown item {id}: collection holds {len} items")]
    UnknownItem { id: ItemId, len: usize },

    /// A document was `null` where an attribute tree was expected
    #[error("Document is null")]
    NullDocument,

    /// An item collection document was not a list
    #[error("Expected a list of items, found {found}")]
    NotAList { found: &'static str },

    // Transparent wrappers for underlying crate errors
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error reflects malformed upstream data rather than an
    /// environmental failure
    pub fn is_data_defect(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::UnsupportedShape { .. } | Self::NullDocument
        )
    }
}
