//! Exploration policy types.
//!
//! Decisions the engine fixes rather than leaving ambiguous:
//!
//! - The step bound limits **total configuration expansions**, not search
//!   depth. A separate, optional `max_depth` cuts off deep branches.
//! - Exploration order is breadth-first by default. The order never changes
//!   which states are reachable; it only affects which counterexample is
//!   found first when several exist, and how much of a bounded search lands
//!   near the root.

/// Which end of the frontier queue to expand next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationOrderV1 {
    /// FIFO: shallowest configurations first. Finds a shortest
    /// counterexample first. Default.
    BreadthFirst,
    /// LIFO: newest configurations first.
    DepthFirst,
}

/// Budget and ordering configuration for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorationPolicyV1 {
    /// Hard cap on configuration expansions.
    pub step_bound: u64,
    /// Optional depth cutoff: successors deeper than this are not enqueued.
    pub max_depth: Option<u64>,
    /// Frontier pop order.
    pub order: ExplorationOrderV1,
}

impl ExplorationPolicyV1 {
    /// Default policy with an explicit step bound.
    #[must_use]
    pub fn bounded(step_bound: u64) -> Self {
        Self {
            step_bound,
            ..Self::default()
        }
    }
}

impl Default for ExplorationPolicyV1 {
    fn default() -> Self {
        Self {
            step_bound: 1000,
            max_depth: None,
            order: ExplorationOrderV1::BreadthFirst,
        }
    }
}
