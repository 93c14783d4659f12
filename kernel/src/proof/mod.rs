//! Canonical encoding and content hashing.
//!
//! Layering within the kernel: `hash` and `hash_domain` stand alone;
//! `tree` consumes the [`hash::StateHash`] value type; `encode` sits on top
//! of both and is the only producer of hash *inputs* for trees. `canon`
//! (canonical JSON) serves diagnostic artifacts only and never feeds tree
//! hashing.

pub mod canon;
pub mod encode;
pub mod hash;
pub mod hash_domain;
