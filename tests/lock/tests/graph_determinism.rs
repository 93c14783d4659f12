//! Exploration determinism locks: the canonical graph artifact is
//! byte-identical across repeated runs, and it survives a violating abort.

use lock_tests::run_world;
use weave_harness::worlds::{phases, relay};
use weave_search::error::EvaluateError;
use weave_search::graph::TerminationV1;
use weave_search::policy::ExplorationPolicyV1;

#[test]
fn exploration_graph_bytes_identical_across_runs() {
    let policy = ExplorationPolicyV1::bounded(10);
    let (_, first) = run_world(phases::objects(), vec![phases::phased_process()], &policy);
    let first_bytes = first.unwrap().graph.to_canonical_json_bytes().unwrap();

    for _ in 1..10 {
        let (_, other) = run_world(phases::objects(), vec![phases::phased_process()], &policy);
        let other_bytes = other.unwrap().graph.to_canonical_json_bytes().unwrap();
        assert_eq!(
            first_bytes, other_bytes,
            "ExplorationGraphV1 bytes differ across runs"
        );
    }
}

#[test]
fn graph_metadata_echoes_the_policy() {
    let policy = ExplorationPolicyV1 {
        max_depth: Some(9),
        ..ExplorationPolicyV1::bounded(42)
    };
    let (_, result) = run_world(phases::objects(), vec![phases::phased_process()], &policy);
    let report = result.unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&report.graph.to_canonical_json_bytes().unwrap()).unwrap();
    let meta = &json["metadata"];
    assert_eq!(meta["step_bound"], 42);
    assert_eq!(meta["max_depth"], 9);
    assert_eq!(meta["order"], "breadth_first");
    assert!(meta["root_fingerprint"].is_string());
    assert!(meta["stats"]["distinct_states"].is_u64());
}

#[test]
fn violating_run_still_yields_a_graph() {
    let (evaluator, result) = run_world(
        relay::objects(),
        relay::processes(),
        &ExplorationPolicyV1::bounded(10),
    );
    assert!(matches!(result, Err(EvaluateError::Violation(_))));

    let graph = evaluator.graph().unwrap();
    assert_eq!(graph.metadata.termination, TerminationV1::ViolationFound);
    let bytes = graph.to_canonical_json_bytes().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["metadata"]["termination"], "violation_found");
}
