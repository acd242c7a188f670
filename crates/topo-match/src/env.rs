//! Matching sessions
//!
//! A [`MatchProcessingEnv`] pairs a shared, read-only item collection with
//! the session's own candidate set. Each rule narrows the candidates to the
//! items whose value agrees with the probe; the set never widens.
//!
//! # Examples
//!
//! ```
//! use topo_match::{AttributeTree, MatchProcessingEnv, MatchRule, RawMatchList};
//! use serde_json::json;
//!
//! let raw = RawMatchList::from_json_str(
//!     r#"[{"name": "web", "zone": "eu"}, {"name": "web", "zone": "us"}]"#,
//! ).unwrap();
//! let rules = [MatchRule::new(["name"]), MatchRule::new(["zone"])];
//! let probe = AttributeTree::try_from(json!({"name": "web", "zone": "us"})).unwrap();
//!
//! let mut env = MatchProcessingEnv::new(&raw);
//! let outcome = env.run(&rules, &probe).unwrap();
//! assert_eq!(outcome.unique().map(|id| id.index()), Some(1));
//! ```

use crate::config::MatchOptions;
use crate::error::{Error, Result};
use crate::index::{build_index, lookup};
use crate::item::{CandidateSet, ItemId, RawMatchList};
use crate::rule::MatchRule;
use crate::tree::AttributeTree;
use serde::Serialize;
use std::collections::HashSet;

/// State of one matching session
#[derive(Debug, Clone)]
pub struct MatchProcessingEnv<'a> {
    raw: &'a RawMatchList,
    current: CandidateSet,
    options: MatchOptions,
}

/// Result of running a rule set against one probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Exactly one candidate survived every rule
    Unique { id: ItemId },
    /// Several candidates survived every rule; with no rules, every
    /// starting candidate
    Ambiguous { ids: Vec<ItemId> },
    /// The rule at this position left no candidates
    NoMatch { rule: usize },
    /// The session had no candidates before any rule was applied
    NoCandidates,
}

impl MatchOutcome {
    pub fn unique(&self) -> Option<ItemId> {
        match self {
            Self::Unique { id } => Some(*id),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch { .. } | Self::NoCandidates)
    }
}

impl<'a> MatchProcessingEnv<'a> {
    /// Start a session where every item of `raw` is a candidate
    pub fn new(raw: &'a RawMatchList) -> Self {
        Self {
            raw,
            current: CandidateSet::all(raw),
            options: MatchOptions::default(),
        }
    }

    /// Start a session restricted to `candidates`
    pub fn with_candidates(raw: &'a RawMatchList, candidates: CandidateSet) -> Result<Self> {
        if let Some(id) = candidates.iter().find(|&id| !raw.contains(id)) {
            return Err(Error::UnknownItem { id, len: raw.len() });
        }

        Ok(Self {
            raw,
            current: candidates,
            options: MatchOptions::default(),
        })
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn raw(&self) -> &'a RawMatchList {
        self.raw
    }

    pub fn current(&self) -> &CandidateSet {
        &self.current
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Apply one rule against `probe`.
    ///
    /// The candidate set is replaced by the candidates that share at least
    /// one of the probe's values for this rule, in their prior order. A
    /// probe without a comparable value empties the set.
    pub fn narrow(&mut self, rule: &MatchRule, probe: &AttributeTree) -> Result<&CandidateSet> {
        let entries = build_index(rule, self)?;
        let probe_values = rule.values(probe, self.options.shape_policy, &"probe")?;

        let matched: HashSet<ItemId> = probe_values
            .iter()
            .filter_map(|value| lookup(&entries, value))
            .flat_map(|entry| entry.ids.iter().copied())
            .collect();

        let before = self.current.len();
        self.current = self.current.retain_into(|id| matched.contains(&id));
        tracing::debug!(
            path = %rule.display_path(),
            probe_values = probe_values.len(),
            before,
            after = self.current.len(),
            "Narrowed candidates"
        );

        Ok(&self.current)
    }

    /// Apply `rules` in priority order, stopping once no candidate is left.
    ///
    /// A session that starts without candidates ends at once with
    /// [`MatchOutcome::NoCandidates`], whatever the rules.
    pub fn run(&mut self, rules: &[MatchRule], probe: &AttributeTree) -> Result<MatchOutcome> {
        if self.current.is_empty() {
            return Ok(MatchOutcome::NoCandidates);
        }

        for (position, rule) in rules.iter().enumerate() {
            if self.narrow(rule, probe)?.is_empty() {
                return Ok(MatchOutcome::NoMatch { rule: position });
            }
        }

        Ok(match self.current.as_slice() {
            [] => MatchOutcome::NoCandidates,
            [id] => MatchOutcome::Unique { id: *id },
            ids => MatchOutcome::Ambiguous { ids: ids.to_vec() },
        })
    }
}

/// Match every probe against `raw`, one isolated session per probe
pub fn match_all<'p>(
    raw: &RawMatchList,
    rules: &[MatchRule],
    probes: impl IntoIterator<Item = &'p AttributeTree>,
    options: MatchOptions,
) -> Result<Vec<MatchOutcome>> {
    probes
        .into_iter()
        .map(|probe| {
            MatchProcessingEnv::new(raw)
                .with_options(options)
                .run(rules, probe)
        })
        .collect()
}
