//! Weave Search: exhaustive interleaving exploration with content-hash dedup.
//!
//! This crate provides the exploration layer for Weave. It depends only on
//! `weave-kernel` -- it does NOT depend on `weave-harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! weave-kernel  ←  weave-search  ←  weave-harness
//! (trees, hashing)  (processes, evaluator)  (adapters, worlds)
//! ```
//!
//! # Key types
//!
//! - [`contract::TrackedObjectV1`] -- the adapter boundary for tracked state
//! - [`process::ProcessV1`] -- an ordered sequence of atomic steps bound to one actor
//! - [`configuration::ConfigurationV1`] -- one immutable point in the explored space
//! - [`policy::ExplorationPolicyV1`] -- step bound, depth cutoff, exploration order
//! - [`evaluator::EvaluatorV1`] -- the frontier/visited search engine
//! - [`graph::ExplorationGraphV1`] -- expansion-event diagnostic artifact

#![forbid(unsafe_code)]

pub mod configuration;
pub mod contract;
pub mod error;
pub mod evaluator;
pub mod frontier;
pub mod graph;
pub mod policy;
pub mod process;
