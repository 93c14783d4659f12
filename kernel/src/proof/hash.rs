//! Content hashing types and the canonical hash function.
//!
//! **Exactly one place computes canonical hashes.** Every fingerprint in the
//! workspace -- tree nodes, configurations, graph artifacts -- routes through
//! [`canonical_hash`] with a typed [`HashDomain`] separator.
//!
//! Algorithm: SHA-256. Hashes are stable and reproducible across runs given
//! identical content; no randomness and no object identity is ever involved.

use sha2::{Digest, Sha256};

use crate::proof::hash_domain::HashDomain;

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Equality and ordering are defined over the raw string -- for a fixed
/// algorithm that is exactly byte order of the digest, which gives the
/// deterministic enumeration order the evaluator relies on.
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`StateHash::parse`]
/// and by construction in [`canonical_hash`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateHash {
    /// Full string in `"algorithm:hex_digest"` format.
    full: String,
    /// Byte offset of the `:` separator (cached from parse).
    colon: usize,
}

impl StateHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl core::fmt::Display for StateHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let digest = hasher.finalize();
    StateHash {
        full: format!("sha256:{}", hex::encode(digest)),
        colon: "sha256".len(),
    }
}
