//! `ExplorationGraphV1`: expansion-event diagnostic artifact.
//!
//! An ordered log of every expansion the evaluator performed, plus aggregate
//! metadata. Informational only -- nothing in the engine reads it back. The
//! canonical JSON form is byte-identical across runs over the same input,
//! which makes it usable as a determinism witness in tests.

use weave_kernel::proof::canon::{canonical_json_bytes, CanonError};

use crate::policy::{ExplorationOrderV1, ExplorationPolicyV1};

/// Why the evaluation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationV1 {
    /// Frontier emptied: every reachable configuration was explored.
    /// Normal termination.
    Exhausted,
    /// The expansion budget was consumed. Normal termination, partial
    /// coverage.
    StepBoundReached,
    /// The frontier emptied, but at least one successor was suppressed by
    /// the depth cutoff. Normal termination, partial coverage.
    DepthBoundReached,
    /// A step raised an assertion violation and the search was aborted.
    ViolationFound,
}

impl TerminationV1 {
    /// Stable string form used in the JSON artifact.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::StepBoundReached => "step_bound_reached",
            Self::DepthBoundReached => "depth_bound_reached",
            Self::ViolationFound => "violation_found",
        }
    }
}

/// Aggregate counters for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationStatsV1 {
    /// Count of distinct configurations discovered (the visited set size).
    pub distinct_states: u64,
    /// Total step executions, including choice re-runs.
    pub transitions: u64,
    /// Configurations popped but discarded because their fingerprint was
    /// already visited.
    pub duplicates_suppressed: u64,
    /// Expansions that produced zero successors.
    pub dead_ends: u64,
    /// Choice points encountered (each forks one successor per member).
    pub choice_forks: u64,
    /// High-water mark of the frontier queue.
    pub frontier_high_water: u64,
}

/// What happened when one process ran during an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcomeV1 {
    /// The step completed; a successor configuration was created.
    Advanced { successor: String },
    /// The step hit an unresolved choice; one successor per member.
    Forked { branches: u64 },
    /// The step hit an empty choice set; no successors from this process.
    EmptyChoice,
    /// The step completed but its successor exceeded the depth cutoff.
    DepthLimited { successor: String },
    /// The step raised an assertion violation; the search aborted here.
    Violation { message: String },
}

/// One process's transition within an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecordV1 {
    /// Process name.
    pub process: String,
    /// What running its step produced.
    pub outcome: TransitionOutcomeV1,
}

/// A single frontier-pop + expansion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEventV1 {
    /// Total order of expansions.
    pub expansion_order: u64,
    /// Hex fingerprint of the expanded configuration.
    pub fingerprint: String,
    /// Depth of the expanded configuration.
    pub depth: u64,
    /// Ordered per-process transition log.
    pub transitions: Vec<TransitionRecordV1>,
    /// True if this expansion produced zero successors.
    pub dead_end: bool,
}

/// Aggregate metadata echoed into the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorationMetadataV1 {
    /// Hex fingerprint of the initial configuration.
    pub root_fingerprint: String,
    /// Why the evaluation stopped.
    pub termination: TerminationV1,
    /// Policy echo: frontier pop order.
    pub order: ExplorationOrderV1,
    /// Policy echo: expansion budget.
    pub step_bound: u64,
    /// Policy echo: depth cutoff.
    pub max_depth: Option<u64>,
    /// Aggregate counters.
    pub stats: EvaluationStatsV1,
}

/// The complete exploration audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorationGraphV1 {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEventV1>,
    /// Aggregate metadata.
    pub metadata: ExplorationMetadataV1,
}

impl ExplorationGraphV1 {
    pub(crate) fn new(
        expansions: Vec<ExpandEventV1>,
        root_fingerprint: String,
        termination: TerminationV1,
        policy: &ExplorationPolicyV1,
        stats: EvaluationStatsV1,
    ) -> Self {
        Self {
            expansions,
            metadata: ExplorationMetadataV1 {
                root_fingerprint,
                termination,
                order: policy.order,
                step_bound: policy.step_bound,
                max_depth: policy.max_depth,
                stats,
            },
        }
    }

    /// The graph as a JSON value (stable shape, sorted at serialization).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let expansions: Vec<serde_json::Value> = self
            .expansions
            .iter()
            .map(|event| {
                let transitions: Vec<serde_json::Value> = event
                    .transitions
                    .iter()
                    .map(|t| {
                        let outcome = match &t.outcome {
                            TransitionOutcomeV1::Advanced { successor } => serde_json::json!({
                                "kind": "advanced",
                                "successor": successor,
                            }),
                            TransitionOutcomeV1::Forked { branches } => serde_json::json!({
                                "kind": "forked",
                                "branches": branches,
                            }),
                            TransitionOutcomeV1::EmptyChoice => serde_json::json!({
                                "kind": "empty_choice",
                            }),
                            TransitionOutcomeV1::DepthLimited { successor } => serde_json::json!({
                                "kind": "depth_limited",
                                "successor": successor,
                            }),
                            TransitionOutcomeV1::Violation { message } => serde_json::json!({
                                "kind": "violation",
                                "message": message,
                            }),
                        };
                        serde_json::json!({
                            "process": t.process,
                            "outcome": outcome,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "expansion_order": event.expansion_order,
                    "fingerprint": event.fingerprint,
                    "depth": event.depth,
                    "transitions": transitions,
                    "dead_end": event.dead_end,
                })
            })
            .collect();

        let order = match self.metadata.order {
            ExplorationOrderV1::BreadthFirst => "breadth_first",
            ExplorationOrderV1::DepthFirst => "depth_first",
        };

        serde_json::json!({
            "expansions": expansions,
            "metadata": {
                "root_fingerprint": self.metadata.root_fingerprint,
                "termination": self.metadata.termination.as_str(),
                "order": order,
                "step_bound": self.metadata.step_bound,
                "max_depth": self.metadata.max_depth,
                "stats": {
                    "distinct_states": self.metadata.stats.distinct_states,
                    "transitions": self.metadata.stats.transitions,
                    "duplicates_suppressed": self.metadata.stats.duplicates_suppressed,
                    "dead_ends": self.metadata.stats.dead_ends,
                    "choice_forks": self.metadata.stats.choice_forks,
                    "frontier_high_water": self.metadata.stats.frontier_high_water,
                },
            },
        })
    }

    /// Serialize the graph to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails (cannot happen for
    /// graphs built by the evaluator, which contain no floats).
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }
}
