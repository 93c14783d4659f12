//! Merkle locality locks: a subtree's hash depends only on its own content,
//! and a parent's hash depends on its compound children only through their
//! hashes.

use weave_kernel::proof::encode::tree_hash;
use weave_kernel::tree::{ChoiceSetV1, StateTree};

#[test]
fn sibling_mutation_does_not_move_child_hash() {
    let child = StateTree::map([
        ("name", StateTree::str("stable")),
        ("count", StateTree::int(3)),
    ]);
    let child_hash = tree_hash(&child).unwrap();

    let parent_before = StateTree::map([
        ("child", child.clone()),
        ("sibling", StateTree::Seq(vec![StateTree::int(1)])),
    ]);
    let parent_after = StateTree::map([
        ("child", child.clone()),
        ("sibling", StateTree::Seq(vec![StateTree::int(2)])),
    ]);

    assert_eq!(
        tree_hash(&child).unwrap(),
        child_hash,
        "child hash must be untouched by sibling mutation"
    );
    assert_ne!(
        tree_hash(&parent_before).unwrap(),
        tree_hash(&parent_after).unwrap(),
        "parent hash must reflect the sibling mutation"
    );
}

#[test]
fn substituting_child_hash_preserves_parent_hash() {
    let seq_child = StateTree::Seq(vec![StateTree::str("p"), StateTree::str("q")]);
    let map_child = StateTree::map([("k", StateTree::Bool(true))]);
    let choice_child = StateTree::Choice(ChoiceSetV1::new(vec![
        StateTree::int(1),
        StateTree::int(2),
    ]));

    let raw = StateTree::map([
        ("seq", seq_child.clone()),
        ("map", map_child.clone()),
        ("choice", choice_child.clone()),
    ]);
    let substituted = StateTree::map([
        ("seq", StateTree::Hash(tree_hash(&seq_child).unwrap())),
        ("map", StateTree::Hash(tree_hash(&map_child).unwrap())),
        ("choice", StateTree::Hash(tree_hash(&choice_child).unwrap())),
    ]);

    assert_eq!(
        tree_hash(&raw).unwrap(),
        tree_hash(&substituted).unwrap(),
        "every compound child must encode as exactly its own hash"
    );
}

#[test]
fn substitution_holds_at_depth() {
    let inner = StateTree::Seq(vec![StateTree::int(7)]);
    let middle = StateTree::map([("inner", inner.clone())]);
    let outer_raw = StateTree::map([("middle", middle.clone())]);

    let middle_substituted = StateTree::map([("inner", StateTree::Hash(tree_hash(&inner).unwrap()))]);
    let outer_substituted =
        StateTree::map([("middle", StateTree::Hash(tree_hash(&middle_substituted).unwrap()))]);

    assert_eq!(
        tree_hash(&outer_raw).unwrap(),
        tree_hash(&outer_substituted).unwrap()
    );
}
