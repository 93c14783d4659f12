//! Hash determinism locks: identical content hashes identically regardless
//! of construction order; distinct content hashes distinctly.

use weave_kernel::proof::encode::tree_hash;
use weave_kernel::tree::{ChoiceSetV1, StateTree};

fn build_map(order: &[(&str, &str)]) -> StateTree {
    StateTree::map(order.iter().map(|&(k, v)| (k, StateTree::str(v))))
}

#[test]
fn mapping_insertion_order_never_matters() {
    let orders: [&[(&str, &str)]; 3] = [
        &[("alpha", "1"), ("beta", "2"), ("gamma", "3")],
        &[("gamma", "3"), ("alpha", "1"), ("beta", "2")],
        &[("beta", "2"), ("gamma", "3"), ("alpha", "1")],
    ];
    let first = tree_hash(&build_map(orders[0])).unwrap();
    for order in &orders[1..] {
        assert_eq!(
            tree_hash(&build_map(order)).unwrap(),
            first,
            "mapping hash must not depend on insertion order"
        );
    }
}

#[test]
fn nested_construction_order_never_matters() {
    let a = StateTree::map([
        ("outer", build_map(&[("x", "1"), ("y", "2")])),
        ("leaf", StateTree::int(9)),
    ]);
    let b = StateTree::map([
        ("leaf", StateTree::int(9)),
        ("outer", build_map(&[("y", "2"), ("x", "1")])),
    ]);
    assert_eq!(tree_hash(&a).unwrap(), tree_hash(&b).unwrap());
}

#[test]
fn repeated_hashing_is_stable() {
    let tree = StateTree::map([
        ("seq", StateTree::Seq(vec![StateTree::int(1), StateTree::Absent])),
        (
            "choice",
            StateTree::Choice(ChoiceSetV1::new(vec![
                StateTree::str("a"),
                StateTree::str("b"),
            ])),
        ),
    ]);
    let first = tree_hash(&tree).unwrap();
    for _ in 0..20 {
        assert_eq!(tree_hash(&tree).unwrap(), first);
    }
}

#[test]
fn distinct_content_hashes_distinctly() {
    let base = build_map(&[("k", "v")]);
    let value_changed = build_map(&[("k", "w")]);
    let key_changed = build_map(&[("j", "v")]);
    let h = tree_hash(&base).unwrap();
    assert_ne!(h, tree_hash(&value_changed).unwrap());
    assert_ne!(h, tree_hash(&key_changed).unwrap());
}
