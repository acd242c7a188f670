//! List projection for key/value list attributes
//!
//! Attributes such as tag arrays are lists of small records:
//!
//! ```json
//! "tags": [{"key": "env", "value": "prod"}, {"key": "team", "value": "core"}]
//! ```
//!
//! A [`ListItemKey`] selects records by the value of one field and projects
//! another field, so items can be matched by logical key instead of by
//! position in the list.

use crate::tree::AttributeTree;
use serde::{Deserialize, Serialize};

/// Locates list records whose `key_key` field equals `key_value` and
/// projects their `value_key` field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListItemKey {
    /// Field holding the record's key
    pub key_key: String,
    /// Key value to select
    pub key_value: String,
    /// Field holding the projected value
    pub value_key: String,
}

impl ListItemKey {
    pub fn new(
        key_key: impl Into<String>,
        key_value: impl Into<String>,
        value_key: impl Into<String>,
    ) -> Self {
        Self {
            key_key: key_key.into(),
            key_value: key_value.into(),
            value_key: value_key.into(),
        }
    }

    /// A key without a key field selects nothing and is ignored by rules
    pub fn is_trivial(&self) -> bool {
        self.key_key.is_empty()
    }
}

/// Project the values of every record selected by `key`.
///
/// The whole projection is `None` when:
/// - `value` is absent or not a list
/// - any element is not a mapping, lacks `key_key`, or has a non-string key
/// - a selected element lacks `value_key` or it is not a string
/// - no element was selected
///
/// One malformed element invalidates the entire list; there are no partial
/// results.
pub fn project<'a>(key: &ListItemKey, value: Option<&'a AttributeTree>) -> Option<Vec<&'a str>> {
    let elements = value?.as_list()?;
    let mut values = Vec::new();

    for element in elements {
        let record = element.as_mapping()?;
        let record_key = record.get(&key.key_key)?.as_str()?;

        if record_key == key.key_value {
            values.push(record.get(&key.value_key)?.as_str()?);
        }
    }

    if values.is_empty() {
        return None;
    }

    Some(values)
}
