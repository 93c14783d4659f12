//! Interleaving discovery locks: exploring both orderings of two
//! independent processes surfaces the ordering that violates the invariant,
//! and the propagated report carries the schedule that reached it.

use lock_tests::run_world;
use weave_harness::worlds::{phases, relay};
use weave_search::error::EvaluateError;
use weave_search::graph::TerminationV1;
use weave_search::policy::{ExplorationOrderV1, ExplorationPolicyV1};
use weave_search::process::{step, ProcessV1};

#[test]
fn observer_first_ordering_is_reported() {
    let (evaluator, result) = run_world(
        relay::objects(),
        relay::processes(),
        &ExplorationPolicyV1::bounded(10),
    );

    let Err(EvaluateError::Violation(report)) = result else {
        panic!("expected a violation, got {result:?}");
    };
    assert_eq!(report.process, "observer");
    assert_eq!(report.cursor, 0);
    assert!(report.message.contains("flag observed before raise"));
    assert!(
        report.schedule.is_empty(),
        "the violating ordering runs the observer from the initial configuration"
    );

    // Evidence is preserved through the abort.
    assert_eq!(evaluator.stats().distinct_states, 1);
    let graph = evaluator.graph().unwrap();
    assert_eq!(graph.metadata.termination, TerminationV1::ViolationFound);
    assert_eq!(graph.metadata.root_fingerprint, report.configuration);
    assert_eq!(graph.expansions.len(), 1, "the abort must be immediate");
}

#[test]
fn depth_first_order_finds_the_same_violation() {
    let policy = ExplorationPolicyV1 {
        order: ExplorationOrderV1::DepthFirst,
        ..ExplorationPolicyV1::bounded(10)
    };
    let (_, result) = run_world(relay::objects(), relay::processes(), &policy);
    assert!(matches!(result, Err(EvaluateError::Violation(_))));
}

#[test]
fn schedule_names_every_transition_to_the_violation() {
    let process = ProcessV1::sequence(
        "worker",
        phases::OBJECT_ID,
        vec![
            step(|scope| scope.write(phases::FIELD, weave_kernel::tree::StateTree::str(phases::BUSY))),
            step(|scope| scope.check(false, "always fails")),
        ],
    );
    let (_, result) = run_world(
        phases::objects(),
        vec![process],
        &ExplorationPolicyV1::bounded(10),
    );

    let Err(EvaluateError::Violation(report)) = result else {
        panic!("expected a violation, got {result:?}");
    };
    assert_eq!(report.schedule.len(), 1, "one transition preceded the violation");
    assert_eq!(report.schedule[0].process, "worker");
    assert_eq!(
        report.schedule[0].configuration.hex_digest(),
        report.configuration,
        "the last schedule entry is the configuration the violating step ran from"
    );
}

#[test]
fn panicking_step_is_reported_as_violation() {
    let process = ProcessV1::sequence(
        "panicker",
        phases::OBJECT_ID,
        vec![step(|_| panic!("exploded"))],
    );
    let (_, result) = run_world(
        phases::objects(),
        vec![process],
        &ExplorationPolicyV1::bounded(10),
    );

    let Err(EvaluateError::Violation(report)) = result else {
        panic!("expected a violation, got {result:?}");
    };
    assert_eq!(report.process, "panicker");
    assert!(report.message.contains("exploded"));
}
