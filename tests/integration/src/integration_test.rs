//! End-to-end matching between two environments
//!
//! Loads a source and a target environment from `test-fixtures`, then
//! correlates every target item with the source items through the rule set
//! in `rules.toml`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use topo_match::{ItemId, MatchOutcome, MatchProcessingEnv, ShapePolicy, build_index, match_all};
use topo_test_utils::{environment_pair, ids};

#[test]
fn test_fixture_loads() {
    let pair = environment_pair("services");

    assert_eq!(pair.source.len(), 5);
    assert_eq!(pair.target.len(), 4);
    assert_eq!(pair.config.rules.len(), 3);
    assert_eq!(pair.config.options.shape_policy, ShapePolicy::StrictLists);
}

#[test]
fn test_match_target_against_source() {
    let pair = environment_pair("services");
    let probes: Vec<_> = pair.target.iter().map(|(_, item)| item).collect();

    let outcomes = match_all(
        &pair.source,
        &pair.config.rules,
        probes,
        pair.config.options,
    )
    .unwrap();

    assert_eq!(
        outcomes,
        vec![
            MatchOutcome::Unique { id: ItemId::new(1) },
            MatchOutcome::Unique { id: ItemId::new(2) },
            MatchOutcome::NoMatch { rule: 2 },
            MatchOutcome::Unique { id: ItemId::new(4) },
        ]
    );
}

#[rstest]
#[case::first_rule(1, &[0, 1])]
#[case::second_rule(2, &[0, 1])]
#[case::all_rules(3, &[1])]
fn test_candidates_shrink_rule_by_rule(#[case] rule_count: usize, #[case] expected: &[usize]) {
    let pair = environment_pair("services");
    let (_, probe) = pair.target.iter().next().unwrap();
    let mut env = MatchProcessingEnv::new(&pair.source).with_options(pair.config.options);

    for rule in &pair.config.rules[..rule_count] {
        env.narrow(rule, probe).unwrap();
    }

    assert_eq!(env.current().as_slice(), ids(expected).as_slice());
}

#[test]
fn test_empty_display_name_is_never_indexed() {
    let pair = environment_pair("services");
    let env = MatchProcessingEnv::new(&pair.source);

    let entries = build_index(&pair.config.rules[0], &env).unwrap();

    let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["checkout", "inventory", "search"]);
    assert!(entries.iter().all(|e| !e.ids.contains(&ItemId::new(3))));
}

#[test]
fn test_numeric_attributes_compare_as_text() {
    let pair = environment_pair("services");
    let env = MatchProcessingEnv::new(&pair.source);
    let rule = topo_test_utils::rule("properties.port");

    let entries = build_index(&rule, &env).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].value, "5432");
    assert_eq!(entries[0].ids, ids(&[2]));
}
