//! `ConfigurationV1`: one immutable point in the explored space.
//!
//! A configuration is the unit of dedup: (snapshot of all tracked objects,
//! every process's cursor, any pending nondeterministic choice). Successor
//! configurations are always new values derived by applying exactly one
//! enabled transition -- a predecessor is never mutated.
//!
//! The schedule (which process ran to reach each ancestor) is lineage for
//! counterexample reporting and is deliberately excluded from the
//! fingerprint: two interleavings that reach the same global state are the
//! same configuration.

use weave_kernel::proof::encode::{canonical_node_bytes, EncodeError};
use weave_kernel::proof::hash::{canonical_hash, StateHash};
use weave_kernel::proof::hash_domain::HashDomain;
use weave_kernel::tree::StateTree;

use crate::contract::SnapshotV1;

/// A pending nondeterministic choice.
///
/// When present, only `process` may run next: it re-executes its current
/// step with `resolved` values fed to `choose` in call order. The fork that
/// created this resume point discarded the step's partial effects, so the
/// snapshot is still the parent's.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumePointV1 {
    /// Index of the process whose step is mid-choice.
    pub process: usize,
    /// Choice values resolved so far, in `choose` call order.
    pub resolved: Vec<StateTree>,
}

/// One schedule entry: which process ran, and the configuration it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEventV1 {
    /// Name of the process that ran.
    pub process: String,
    /// Fingerprint of the configuration the step produced.
    pub configuration: StateHash,
}

/// One point in the explored state space.
#[derive(Debug, Clone)]
pub struct ConfigurationV1 {
    /// Snapshot of every tracked object.
    pub snapshot: SnapshotV1,
    /// Each process's next-step cursor, indexed by process position.
    pub cursors: Vec<u64>,
    /// Pending nondeterministic choice, if a step is mid-fork.
    pub resume: Option<ResumePointV1>,
    /// Transition count from the initial configuration.
    pub depth: u64,
    /// Lineage from the initial configuration (excluded from the fingerprint).
    pub schedule: Vec<ScheduleEventV1>,
}

impl ConfigurationV1 {
    /// The initial configuration: supplied snapshot, zeroed cursors, no
    /// pending choice, empty schedule.
    #[must_use]
    pub fn initial(snapshot: SnapshotV1, process_count: usize) -> Self {
        Self {
            snapshot,
            cursors: vec![0; process_count],
            resume: None,
            depth: 0,
            schedule: Vec::new(),
        }
    }

    /// Canonical content fingerprint of this configuration.
    ///
    /// Pure function of (snapshot, cursors, resume); schedule and depth do
    /// not participate. Identical global states reached along different
    /// interleavings fingerprint identically.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the snapshot (or a pending choice value)
    /// cannot be canonically encoded.
    pub fn fingerprint(&self) -> Result<StateHash, EncodeError> {
        let tree = self.identity_tree();
        Ok(canonical_hash(
            HashDomain::Configuration,
            &canonical_node_bytes(&tree)?,
        ))
    }

    /// The identity of this configuration as a tree: objects, cursors, and
    /// any pending choice resolution.
    #[allow(clippy::cast_possible_wrap)]
    fn identity_tree(&self) -> StateTree {
        let cursors = StateTree::Seq(self.cursors.iter().map(|&c| StateTree::Int(c as i64)).collect());
        let resume = match &self.resume {
            None => StateTree::Absent,
            Some(point) => StateTree::map([
                ("process", StateTree::Int(point.process as i64)),
                ("values", StateTree::Seq(point.resolved.clone())),
            ]),
        };
        StateTree::map([
            ("objects", self.snapshot.to_tree()),
            ("cursors", cursors),
            ("resume", resume),
        ])
    }
}
