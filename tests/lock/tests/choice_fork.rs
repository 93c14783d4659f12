//! Choice-set forking locks: one successor per member in canonical order,
//! set semantics for duplicates, and the empty-set dead end.

use lock_tests::run_world;
use weave_harness::worlds::dice;
use weave_search::graph::TerminationV1;
use weave_search::policy::ExplorationPolicyV1;

#[test]
fn fork_visits_one_branch_per_face() {
    let (_, result) = run_world(
        dice::objects(),
        dice::processes(&[3, 1, 2]),
        &ExplorationPolicyV1::bounded(100),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::Exhausted);
    // Initial + one pending-choice configuration per face + one rolled
    // configuration per face.
    assert_eq!(report.stats.distinct_states, 7);
    assert_eq!(report.stats.choice_forks, 1);
    assert_eq!(report.stats.dead_ends, 3, "each rolled die is final");
}

#[test]
fn fork_order_is_content_derived() {
    let (_, a) = run_world(
        dice::objects(),
        dice::processes(&[1, 2, 3]),
        &ExplorationPolicyV1::bounded(100),
    );
    let (_, b) = run_world(
        dice::objects(),
        dice::processes(&[3, 2, 1]),
        &ExplorationPolicyV1::bounded(100),
    );
    assert_eq!(
        a.unwrap().graph.to_canonical_json_bytes().unwrap(),
        b.unwrap().graph.to_canonical_json_bytes().unwrap(),
        "member insertion order must not affect exploration"
    );
}

#[test]
fn duplicate_members_collapse() {
    let (_, doubled) = run_world(
        dice::objects(),
        dice::processes(&[2, 2]),
        &ExplorationPolicyV1::bounded(100),
    );
    let (_, single) = run_world(
        dice::objects(),
        dice::processes(&[2]),
        &ExplorationPolicyV1::bounded(100),
    );
    assert_eq!(
        doubled.unwrap().graph.to_canonical_json_bytes().unwrap(),
        single.unwrap().graph.to_canonical_json_bytes().unwrap(),
        "a choice set has set semantics"
    );
}

#[test]
fn empty_choice_set_is_a_dead_end_not_an_error() {
    let (_, result) = run_world(
        dice::objects(),
        dice::processes(&[]),
        &ExplorationPolicyV1::bounded(100),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::Exhausted);
    assert_eq!(report.stats.distinct_states, 1);
    assert_eq!(report.stats.dead_ends, 1);
    assert_eq!(report.stats.choice_forks, 0);
}
