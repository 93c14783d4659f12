//! Shared helpers for the weave benchmark suites.

use weave_kernel::tree::StateTree;

/// Build a flat mapping with `width` integer fields.
#[must_use]
pub fn wide_tree(width: usize) -> StateTree {
    StateTree::map((0..width).map(|i| {
        (
            format!("field_{i:04}"),
            StateTree::Int(i64::try_from(i).unwrap_or(0)),
        )
    }))
}

/// Build a nesting of mappings `depth` levels deep, one child per level.
#[must_use]
pub fn deep_tree(depth: usize) -> StateTree {
    let mut tree = StateTree::int(0);
    for i in 0..depth {
        tree = StateTree::map([(format!("level_{i:04}"), tree)]);
    }
    tree
}
