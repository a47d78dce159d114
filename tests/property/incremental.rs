//! Property-based tests for append and update equivalence

use merkle::hash::canonicalize;
use merkle::{HashAlgorithm, LeafValue, MerkleTree};
use proptest::prelude::*;

fn leaf_value() -> impl Strategy<Value = LeafValue> {
    prop_oneof![
        any::<i64>().prop_map(LeafValue::Integer),
        "[a-z]{0,8}".prop_map(LeafValue::Text),
        any::<bool>().prop_map(LeafValue::Bool),
    ]
}

#[derive(Debug, Clone)]
enum Edit {
    Append(LeafValue),
    Update(usize, LeafValue),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        leaf_value().prop_map(Edit::Append),
        (any::<usize>(), leaf_value()).prop_map(|(i, v)| Edit::Update(i, v)),
    ]
}

proptest! {
    /// Growing a tree leaf by leaf matches building it in one shot
    #[test]
    fn append_matches_rebuild(
        initial in prop::collection::vec(leaf_value(), 1..40),
        appended in prop::collection::vec(leaf_value(), 0..40),
    ) {
        let mut tree = MerkleTree::with_algorithm(initial.clone(), HashAlgorithm::Sha1).unwrap();
        tree.add_nodes(appended.clone());

        let all: Vec<LeafValue> = initial.into_iter().chain(appended).collect();
        let rebuilt = MerkleTree::with_algorithm(all, HashAlgorithm::Sha1).unwrap();
        prop_assert_eq!(tree.levels(), rebuilt.levels());
    }

    /// Any mix of appends and in-range updates matches a rebuild of the final data
    #[test]
    fn edits_match_rebuild(
        initial in prop::collection::vec(leaf_value(), 1..24),
        edits in prop::collection::vec(edit(), 0..24),
    ) {
        let mut tree = MerkleTree::new(initial).unwrap();
        for edit in edits {
            match edit {
                Edit::Append(value) => {
                    tree.add_node(value);
                }
                Edit::Update(index, value) => {
                    let index = index % tree.len();
                    prop_assert!(tree.update_node_at(index, value));
                }
            }
        }

        let rebuilt = MerkleTree::new(tree.data().to_vec()).unwrap();
        prop_assert_eq!(tree.root(), rebuilt.root());
        prop_assert_eq!(tree.levels(), rebuilt.levels());
    }

    /// Out-of-range updates never change the tree
    #[test]
    fn out_of_range_update_is_rejected(
        values in prop::collection::vec(leaf_value(), 1..16),
        offset in 0usize..8,
        value in leaf_value(),
    ) {
        let mut tree = MerkleTree::new(values).unwrap();
        let before = tree.levels().to_vec();
        prop_assert!(!tree.update_node_at(tree.len() + offset, value));
        prop_assert_eq!(tree.levels(), before.as_slice());
    }

    /// Every leaf digest maps back to a leaf with the same canonical form
    #[test]
    fn reverse_index_round_trip(values in prop::collection::vec(leaf_value(), 1..32)) {
        let tree = MerkleTree::new(values.clone()).unwrap();
        for value in &values {
            let digest = tree.create_hash(value);
            prop_assert_eq!(
                tree.get_data_from_hash(&digest).map(canonicalize),
                Some(canonicalize(value))
            );
        }
    }
}
