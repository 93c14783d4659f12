//! Canonical node encoding: the single serialization-for-hashing
//! implementation for [`StateTree`] values.
//!
//! **Exactly one place** produces hash-input bytes for trees. All tree
//! hashing routes through [`tree_hash`].
//!
//! # Encoding rules
//!
//! 1. Compound children (mapping, sequence, choice set) are reduced to their
//!    own [`StateHash`] first, depth-first and post-order, and the hash is
//!    substituted in place of the raw child. A node's encoding is therefore a
//!    pure function of its flat values plus the hashes of its compound
//!    children, never of their raw content.
//! 2. Every value carries a distinct tag byte; embedded hashes use their own
//!    tag so they can never be confused with string or byte leaves.
//! 3. Mapping entries are encoded in sorted key order; sequence entries are
//!    positional; choice members are encoded as their sorted, deduplicated
//!    member hashes.
//! 4. Variable-length payloads are length-prefixed (u64, little-endian).
//! 5. Floats are rejected to prevent cross-platform formatting drift.
//!
//! Node kinds are separated by [`HashDomain`], so an empty mapping, an empty
//! sequence, and an empty choice set all hash differently.

use crate::proof::hash::{canonical_hash, StateHash};
use crate::proof::hash_domain::HashDomain;
use crate::tree::choice::ChoiceSetV1;
use crate::tree::value::StateTree;

/// Error type for canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A number leaf was not canonically encodable (float, NaN, Infinity).
    NonCanonicalNumber { raw: String },
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonCanonicalNumber { raw } => {
                write!(f, "non-canonical number in state tree: {raw}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

// Value tags. TAG_HASH is distinct from every leaf tag so an embedded hash
// can never collide with a string or byte leaf of the same bytes.
const TAG_ABSENT: u8 = 0x00;
const TAG_FALSE: u8 = 0x01;
const TAG_TRUE: u8 = 0x02;
const TAG_INT: u8 = 0x03;
const TAG_STR: u8 = 0x04;
const TAG_BYTES: u8 = 0x05;
const TAG_HASH: u8 = 0x06;

/// Compute the canonical hash of a tree.
///
/// Equal content (regardless of construction order) hashes equally;
/// structurally different content hashes differently with the collision
/// resistance of SHA-256.
///
/// # Errors
///
/// Returns [`EncodeError::NonCanonicalNumber`] if the tree (or any choice
/// member) contains a float leaf.
pub fn tree_hash(tree: &StateTree) -> Result<StateHash, EncodeError> {
    Ok(canonical_hash(node_domain(tree), &canonical_node_bytes(tree)?))
}

/// Produce the hash-input bytes for a single node.
///
/// Compound children are reduced to their hashes before the node is
/// encoded; the returned bytes never contain a nested compound encoding.
///
/// # Errors
///
/// Returns [`EncodeError::NonCanonicalNumber`] if the node (or any choice
/// member) contains a float leaf.
pub fn canonical_node_bytes(tree: &StateTree) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    match tree {
        StateTree::Map(entries) => {
            write_len(&mut buf, entries.len());
            for (key, value) in entries {
                write_len(&mut buf, key.len());
                buf.extend_from_slice(key.as_bytes());
                write_value(&mut buf, value)?;
            }
        }
        StateTree::Seq(items) => {
            write_len(&mut buf, items.len());
            for item in items {
                write_value(&mut buf, item)?;
            }
        }
        StateTree::Choice(set) => {
            let members = set.canonical_members()?;
            write_len(&mut buf, members.len());
            for (hash, _) in &members {
                write_hash(&mut buf, hash);
            }
        }
        leaf => write_value(&mut buf, leaf)?,
    }
    Ok(buf)
}

/// The hash domain for a node of this kind.
const fn node_domain(tree: &StateTree) -> HashDomain {
    match tree {
        StateTree::Map(_) => HashDomain::MapNode,
        StateTree::Seq(_) => HashDomain::SeqNode,
        StateTree::Choice(_) => HashDomain::ChoiceNode,
        _ => HashDomain::LeafValue,
    }
}

/// Encode one child position: leaves inline, compounds as their hash.
fn write_value(buf: &mut Vec<u8>, value: &StateTree) -> Result<(), EncodeError> {
    match value {
        StateTree::Absent => buf.push(TAG_ABSENT),
        StateTree::Bool(false) => buf.push(TAG_FALSE),
        StateTree::Bool(true) => buf.push(TAG_TRUE),
        StateTree::Int(v) => {
            buf.push(TAG_INT);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        StateTree::Float(v) => {
            return Err(EncodeError::NonCanonicalNumber { raw: v.to_string() });
        }
        StateTree::Str(s) => {
            buf.push(TAG_STR);
            write_len(buf, s.len());
            buf.extend_from_slice(s.as_bytes());
        }
        StateTree::Bytes(b) => {
            buf.push(TAG_BYTES);
            write_len(buf, b.len());
            buf.extend_from_slice(b);
        }
        StateTree::Hash(h) => write_hash(buf, h),
        compound @ (StateTree::Map(_) | StateTree::Seq(_) | StateTree::Choice(_)) => {
            let h = tree_hash(compound)?;
            write_hash(buf, &h);
        }
    }
    Ok(())
}

fn write_hash(buf: &mut Vec<u8>, hash: &StateHash) {
    buf.push(TAG_HASH);
    write_len(buf, hash.as_str().len());
    buf.extend_from_slice(hash.as_str().as_bytes());
}

#[allow(clippy::cast_possible_truncation)]
fn write_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u64).to_le_bytes());
}

impl ChoiceSetV1 {
    /// Members paired with their canonical hashes, sorted by hash with
    /// duplicate hashes collapsed. This is the fixed, content-derived order
    /// the evaluator forks in; insertion order never matters.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonCanonicalNumber`] if any member cannot be
    /// canonically encoded.
    pub fn canonical_members(&self) -> Result<Vec<(StateHash, StateTree)>, EncodeError> {
        let mut out: Vec<(StateHash, StateTree)> = Vec::with_capacity(self.members().len());
        for member in self.members() {
            out.push((tree_hash(member)?, member.clone()));
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out.dedup_by(|a, b| a.0 == b.0);
        Ok(out)
    }
}
