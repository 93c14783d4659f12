//! Bounded termination locks: generator processes never finish on their
//! own, and every budget produces a clean, documented termination.

use lock_tests::run_world;
use weave_harness::worlds::{rotor, toggle};
use weave_search::graph::TerminationV1;
use weave_search::policy::ExplorationPolicyV1;

#[test]
fn toggling_generator_terminates_under_a_bound_of_four() {
    let (_, result) = run_world(
        toggle::objects(),
        toggle::processes(),
        &ExplorationPolicyV1::bounded(4),
    );
    let report = result.unwrap();
    // The two-position cycle converges before the bound bites.
    assert_eq!(report.termination, TerminationV1::Exhausted);
    assert_eq!(report.stats.distinct_states, 2);
    assert!(report.stats.duplicates_suppressed >= 1);
}

#[test]
fn step_bound_caps_total_expansions() {
    let (_, result) = run_world(
        rotor::objects(),
        rotor::processes(10),
        &ExplorationPolicyV1::bounded(3),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::StepBoundReached);
    assert_eq!(
        report.stats.distinct_states, 3,
        "the bound limits expansions, not depth"
    );
    assert_eq!(report.graph.expansions.len(), 3);
}

#[test]
fn zero_bound_expands_nothing() {
    let (_, result) = run_world(
        toggle::objects(),
        toggle::processes(),
        &ExplorationPolicyV1::bounded(0),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::StepBoundReached);
    assert_eq!(report.stats.distinct_states, 0);
}

#[test]
fn depth_cutoff_reports_partial_coverage() {
    let policy = ExplorationPolicyV1 {
        max_depth: Some(1),
        ..ExplorationPolicyV1::bounded(100)
    };
    let (_, result) = run_world(rotor::objects(), rotor::processes(10), &policy);
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::DepthBoundReached);
    assert_eq!(
        report.stats.distinct_states, 2,
        "only the root and its depth-1 successor are expanded"
    );
}
