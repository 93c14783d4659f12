//! Linear exploration locks: a sequential process visits one configuration
//! per step, and sub-calls stay inside the step's atomic boundary.

use lock_tests::run_world;
use weave_harness::worlds::phases;
use weave_search::graph::TerminationV1;
use weave_search::policy::ExplorationPolicyV1;

#[test]
fn two_step_sequence_visits_three_configurations() {
    let (_, result) = run_world(
        phases::objects(),
        vec![phases::phased_process()],
        &ExplorationPolicyV1::bounded(10),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::Exhausted);
    assert_eq!(
        report.stats.distinct_states, 3,
        "initial, after step 1, after step 2"
    );
    assert_eq!(report.stats.transitions, 2);
    assert_eq!(report.stats.dead_ends, 1, "the finished process dead-ends");
}

#[test]
fn sub_call_produces_a_single_transition() {
    let (_, result) = run_world(
        phases::objects(),
        vec![phases::fused_process()],
        &ExplorationPolicyV1::bounded(10),
    );
    let report = result.unwrap();
    assert_eq!(report.termination, TerminationV1::Exhausted);
    assert_eq!(
        report.stats.distinct_states, 2,
        "the intermediate phase must never be an observable configuration"
    );
    assert_eq!(report.stats.transitions, 1);
}

#[test]
fn finished_process_offers_no_steps() {
    let (_, result) = run_world(
        phases::objects(),
        vec![phases::phased_process()],
        &ExplorationPolicyV1::bounded(10),
    );
    let report = result.unwrap();
    let last = report.graph.expansions.last().unwrap();
    assert!(last.dead_end);
    assert!(last.transitions.is_empty());
}
