//! Matching session isolation and narrowing guarantees

use pretty_assertions::assert_eq;
use serde_json::json;
use std::thread;
use topo_match::{
    CandidateSet, Error, MatchOptions, MatchOutcome, MatchProcessingEnv, ShapePolicy, build_index,
};
use topo_test_utils::{ids, items, rule, tag_rule, tree};

#[test]
fn test_concurrent_sessions_share_items() {
    let raw = items(json!([
        {"name": "web", "zone": "eu"},
        {"name": "web", "zone": "us"},
        {"name": "db", "zone": "us"}
    ]));
    let rules = [rule("name"), rule("zone")];
    let probes = [
        tree(json!({"name": "web", "zone": "us"})),
        tree(json!({"name": "db", "zone": "us"})),
        tree(json!({"name": "web", "zone": "ap"})),
    ];

    let outcomes: Vec<MatchOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = probes
            .iter()
            .map(|probe| {
                let raw = &raw;
                let rules = &rules;
                scope.spawn(move || MatchProcessingEnv::new(raw).run(rules, probe).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes[0].unique().map(|id| id.index()), Some(1));
    assert_eq!(outcomes[1].unique().map(|id| id.index()), Some(2));
    assert_eq!(outcomes[2], MatchOutcome::NoMatch { rule: 1 });
    assert_eq!(raw.len(), 3);
}

#[test]
fn test_restricted_session_never_sees_other_items() {
    let raw = items(json!([{"name": "A"}, {"name": "A"}, {"name": "A"}]));
    let candidates: CandidateSet = ids(&[2, 0]).into_iter().collect();
    let mut env = MatchProcessingEnv::with_candidates(&raw, candidates).unwrap();

    let outcome = env.run(&[rule("name")], &tree(json!({"name": "A"}))).unwrap();

    assert_eq!(outcome, MatchOutcome::Ambiguous { ids: ids(&[2, 0]) });
}

#[test]
fn test_later_rule_cannot_widen() {
    let raw = items(json!([
        {"name": "A", "tags": [{"key": "env", "value": "prod"}]},
        {"name": "B", "tags": [{"key": "env", "value": "prod"}]}
    ]));
    let mut env = MatchProcessingEnv::new(&raw);
    let probe = tree(json!({"name": "A", "tags": [{"key": "env", "value": "prod"}]}));

    env.narrow(&rule("name"), &probe).unwrap();
    let after_tags = env.narrow(&tag_rule("tags", "env"), &probe).unwrap();

    assert_eq!(after_tags.as_slice(), ids(&[0]).as_slice());
}

#[test]
fn test_index_over_narrowed_set() {
    let raw = items(json!([
        {"name": "A", "zone": "eu"},
        {"name": "B", "zone": "eu"},
        {"name": "A", "zone": "us"}
    ]));
    let mut env = MatchProcessingEnv::new(&raw);
    env.narrow(&rule("name"), &tree(json!({"name": "A"}))).unwrap();

    let entries = build_index(&rule("zone"), &env).unwrap();

    let summary: Vec<(&str, Vec<usize>)> = entries
        .iter()
        .map(|e| (e.value.as_str(), e.ids.iter().map(|id| id.index()).collect()))
        .collect();
    assert_eq!(summary, vec![("eu", vec![0]), ("us", vec![2])]);
}

#[test]
fn test_shape_policy_controls_failures() {
    let raw = items(json!([{"aliases": ["a", 1, {"x": "y"}]}]));
    let probe = tree(json!({"aliases": ["a"]}));

    let strict = MatchProcessingEnv::new(&raw).run(&[rule("aliases")], &probe);
    assert!(matches!(strict, Err(Error::TypeMismatch { found: "mapping", .. })));

    let lenient = MatchProcessingEnv::new(&raw)
        .with_options(MatchOptions::with_shape_policy(ShapePolicy::Lenient))
        .run(&[rule("aliases")], &probe)
        .unwrap();
    assert_eq!(lenient.unique().map(|id| id.index()), Some(0));
}
