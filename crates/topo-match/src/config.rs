//! Matching configuration
//!
//! A [`MatchConfig`] bundles the ordered rule set with the options that
//! control how unexpected attribute shapes are handled. It is usually
//! authored as TOML:
//!
//! ```toml
//! [options]
//! shape_policy = "strict-lists"
//!
//! [[rules]]
//! path = ["metadata", "name"]
//!
//! [[rules]]
//! path = ["tags"]
//! list_item_key = { key_key = "key", key_value = "env", value_key = "value" }
//! ```

use crate::error::Result;
use crate::rule::MatchRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How index construction reacts to attribute values it cannot compare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapePolicy {
    /// Skip every value that is not a string
    Lenient,
    /// Fail on non-string list elements; treat mapping values as absent
    #[default]
    StrictLists,
    /// Fail on non-string list elements and on mapping values
    Strict,
}

/// Options for a matching session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub shape_policy: ShapePolicy,
}

impl MatchOptions {
    pub fn with_shape_policy(shape_policy: ShapePolicy) -> Self {
        Self { shape_policy }
    }
}

/// Rule set plus options, loaded from TOML or JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub options: MatchOptions,
    /// Rules in priority order
    #[serde(default)]
    pub rules: Vec<MatchRule>,
}

impl MatchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from disk; `.json` files are read as JSON, everything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::debug!(?path, rules = config.rules.len(), "Loaded match config");
        Ok(config)
    }
}
