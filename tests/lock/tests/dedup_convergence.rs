//! Dedup convergence locks: once a cycle has been fully traversed, the
//! distinct-state count stops growing no matter how generous the bound.

use lock_tests::run_world;
use weave_harness::worlds::rotor;
use weave_search::graph::TerminationV1;
use weave_search::policy::ExplorationPolicyV1;

const PERIOD: i64 = 5;

#[test]
fn state_count_stops_at_the_cycle_length() {
    let (_, result) = run_world(
        rotor::objects(),
        rotor::processes(PERIOD),
        &ExplorationPolicyV1::bounded(100),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::Exhausted);
    assert_eq!(u64::try_from(PERIOD).unwrap(), report.stats.distinct_states);
    assert!(
        report.stats.duplicates_suppressed >= 1,
        "closing the cycle must hit the visited set"
    );
}

#[test]
fn larger_bounds_discover_nothing_new() {
    let (_, small) = run_world(
        rotor::objects(),
        rotor::processes(PERIOD),
        &ExplorationPolicyV1::bounded(100),
    );
    let (_, large) = run_world(
        rotor::objects(),
        rotor::processes(PERIOD),
        &ExplorationPolicyV1::bounded(10_000),
    );
    assert_eq!(
        small.unwrap().stats.distinct_states,
        large.unwrap().stats.distinct_states
    );
}
