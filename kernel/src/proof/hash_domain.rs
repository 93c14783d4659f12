//! Typed domain separators for canonical hashing.
//!
//! Every production hash computation MUST select a domain via [`HashDomain`].
//! This module is the single authority for domain-separator byte strings.
//! Adding a new domain is a single change here -- the enum, `as_bytes()`,
//! `ALL`, and `Display` are all generated from the same macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used
        /// as a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            ///
            /// Generated from the same macro invocation as the enum -- cannot diverge.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Kernel (tree layer)
    // -----------------------------------------------------------------------

    /// Root-level leaf value hashing.
    LeafValue => b"WEAVE::LEAF_VALUE::V1\0",

    /// Sequence node hashing (positional children).
    SeqNode => b"WEAVE::SEQ_NODE::V1\0",

    /// Mapping node hashing (sorted-key children).
    MapNode => b"WEAVE::MAP_NODE::V1\0",

    /// Choice-set node hashing (sorted member hashes).
    ChoiceNode => b"WEAVE::CHOICE_NODE::V1\0",

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Configuration fingerprint hashing (dedup, revisit detection).
    Configuration => b"WEAVE::CONFIGURATION::V1\0",

    /// Exploration-graph artifact hashing.
    ExplorationGraph => b"WEAVE::EXPLORATION_GRAPH::V1\0",
}
