//! Integration tests for in-place updates and reverse lookups

use merkle::{HashAlgorithm, LeafValue, MerkleTree};
use serde_json::json;

fn rebuilt_root(tree: &MerkleTree) -> String {
    MerkleTree::with_algorithm(tree.data().to_vec(), tree.algorithm())
        .unwrap()
        .root()
        .to_string()
}

#[test]
fn test_single_leaf_update() {
    let mut tree = MerkleTree::new([1]).unwrap();
    assert!(tree.update_node_at(0, "test"));
    assert_eq!(tree.data()[0], LeafValue::from("test"));
    assert_eq!(tree.root(), MerkleTree::new(["test"]).unwrap().root());
    assert!(!tree.update_node_at(5, "test"));
}

#[test]
fn test_update_matches_tree_built_from_updated_values() {
    let mut tree = MerkleTree::new(1..=8i64).unwrap();
    assert_eq!(
        tree.root(),
        "c27450cd3fd4df029145f3437ae9c381e0ae55e8400de06cb973005b36d7b222"
    );

    assert!(tree.update_node_at(3, 10));
    let expected = MerkleTree::new([1, 2, 3, 10, 5, 6, 7, 8]).unwrap();
    assert_eq!(tree.root(), expected.root());

    assert!(tree.update_node_at(0, 0));
    assert!(tree.update_node_at(7, 10000));
    let expected = MerkleTree::new([0, 2, 3, 10, 5, 6, 7, 10000]).unwrap();
    assert_eq!(tree.root(), expected.root());
}

#[test]
fn test_updates_on_odd_length_trees() {
    let mut tree = MerkleTree::new(vec![0.5f64; 11]).unwrap();
    assert!(tree.update_node_at(4, 999));
    assert!(tree.update_node_at(9, 123123));
    assert!(tree.update_node_at(10, "last"));
    assert_eq!(tree.root(), rebuilt_root(&tree));
}

#[test]
fn test_updates_on_large_tree() {
    let mut tree = MerkleTree::new(vec![0.25f64; 10_000]).unwrap();
    let before = tree.root().to_string();

    assert!(tree.update_node_at(4000, 9999));
    assert!(tree.update_node_at(9999, 9999));
    assert_ne!(tree.root(), before);
    assert_eq!(tree.data()[4000], LeafValue::from(9999));
    assert_eq!(tree.root(), rebuilt_root(&tree));
}

#[test]
fn test_updates_interleaved_with_appends() {
    let mut tree = MerkleTree::with_algorithm(["a", "b", "c"], HashAlgorithm::Sha512).unwrap();
    tree.add_node("d");
    assert!(tree.update_node_at(2, "C"));
    tree.add_nodes(["e", "f", "g"]);
    assert!(tree.update_node_at(6, "G"));
    assert!(tree.update_node_at(0, "A"));

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.root(), rebuilt_root(&tree));
    assert_eq!(tree.depth(), MerkleTree::max_depth_from_length(7));
}

#[test]
fn test_get_data_from_hash_for_every_leaf() {
    let values: Vec<LeafValue> = vec![
        "some".into(),
        1.into(),
        "data".into(),
        json!({"array": ["ok"]}).into(),
    ];
    let tree = MerkleTree::new(values.clone()).unwrap();

    for value in &values {
        let digest = tree.create_hash(value);
        assert_eq!(tree.get_data_from_hash(&digest), Some(value));
    }
    assert_eq!(tree.get_data_from_hash("not-a-digest"), None);
}

#[test]
fn test_max_depth_from_length() {
    assert_eq!(MerkleTree::max_depth_from_length(0), 1);
    assert_eq!(MerkleTree::max_depth_from_length(1), 1);
    assert_eq!(MerkleTree::max_depth_from_length(10), 5);
    assert_eq!(MerkleTree::max_depth_from_length(100), 8);
    assert_eq!(MerkleTree::max_depth_from_length(200), 9);
    assert_eq!(MerkleTree::max_depth_from_length(500), 10);
    assert_eq!(MerkleTree::max_depth_from_length(1000), 11);

    let tree = MerkleTree::new(vec![0.75f64; 500]).unwrap();
    assert_eq!(tree.depth(), 10);
}
