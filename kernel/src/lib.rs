//! Weave Kernel: the deterministic core of the Weave model checker.
//!
//! # API Surface
//!
//! The kernel exposes two concerns:
//!
//! - [`tree`] -- the canonical nested-value model (`StateTree`, `ChoiceSetV1`)
//! - [`proof`] -- canonical encoding and content hashing (`tree_hash`,
//!   `canonical_hash`, canonical JSON)
//!
//! # Module Dependency Direction
//!
//! `proof::hash` ← `tree` ← `proof::encode`
//!
//! One-way only. `proof::hash` stands alone; `tree` consumes the
//! [`proof::hash::StateHash`] value type; `proof::encode` is the only
//! producer of hash inputs for trees. The kernel knows nothing about
//! processes, configurations, or exploration -- those live upstack in
//! `weave-search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod tree;
