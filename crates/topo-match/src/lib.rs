//! Rule-driven matching of configuration items for Topology Sync
//!
//! Correlates items between two independently authored collections, such
//! as the same object in a source and a target environment. A sequence of
//! [`MatchRule`]s narrows the candidates from one collection down to the
//! items whose attributes agree with a probe item from the other.
//!
//! - [`path`] resolves attribute paths in an [`AttributeTree`]
//! - [`projection`] extracts values from key/value list attributes
//! - [`index`] builds the sorted value index of one rule
//! - [`env`] holds the per-session candidate set and runs the narrowing

pub mod config;
pub mod env;
pub mod error;
pub mod index;
pub mod item;
pub mod logging;
pub mod path;
pub mod projection;
pub mod rule;
pub mod tree;

pub use config::{MatchConfig, MatchOptions, ShapePolicy};
pub use env::{MatchOutcome, MatchProcessingEnv, match_all};
pub use error::{Error, Result};
pub use index::{IndexEntry, ValueIndex, build_index, flatten_sorted, lookup};
pub use item::{CandidateSet, ItemId, RawMatchList};
pub use path::resolve;
pub use projection::{ListItemKey, project};
pub use rule::{Extracted, MatchRule};
pub use tree::AttributeTree;
