//! `ChoiceSetV1`: a finite nondeterministic branch point.
//!
//! A choice set holds the candidate values a step may consume. The evaluator
//! forks one successor per member, in a fixed order derived from member
//! content (sorted by canonical member hash, duplicates collapsed) -- never
//! from insertion order. The content-derived enumeration lives in
//! [`crate::proof::encode`], next to the hashing it depends on.

use crate::tree::value::StateTree;

/// A finite set of candidate values for a nondeterministic choice.
///
/// Construction keeps insertion order; enumeration order is canonical. An
/// empty set is legal and enumerates to nothing (a dead end for the branch
/// that consumes it, not an error).
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSetV1 {
    members: Vec<StateTree>,
}

impl ChoiceSetV1 {
    /// Build a choice set from candidate members.
    #[must_use]
    pub fn new(members: Vec<StateTree>) -> Self {
        Self { members }
    }

    /// Members in insertion order. Exploration must not use this order;
    /// see `canonical_members` in `proof::encode`.
    #[must_use]
    pub fn members(&self) -> &[StateTree] {
        &self.members
    }

    /// Number of members, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<StateTree> for ChoiceSetV1 {
    fn from_iter<I: IntoIterator<Item = StateTree>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
