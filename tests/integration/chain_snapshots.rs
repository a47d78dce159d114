//! Integration tests for snapshot chains

use merkle::hash::HashCache;
use merkle::{HashAlgorithm, HashEngine, LeafValue, MerkleChain, MerkleTree};
use std::sync::Arc;

const GENESIS: i64 = 1_650_000_000_000;

#[test]
fn test_single_snapshot_chain_root_hashes_snapshot_root() {
    let chain = MerkleChain::with_genesis(GENESIS, ["a", "b", "c"], HashEngine::default());
    let snapshot = MerkleTree::new(vec![
        LeafValue::from(GENESIS),
        "a".into(),
        "b".into(),
        "c".into(),
    ])
    .unwrap();

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.to_root_array(), vec![snapshot.root().to_string()]);
    assert_eq!(
        chain.root(),
        HashEngine::default().hash_str(snapshot.root())
    );
}

#[test]
fn test_chain_root_is_tree_over_snapshot_roots() {
    let engine = HashEngine::new(HashAlgorithm::Sha3_256);
    let mut chain = MerkleChain::with_genesis(GENESIS, [1, 2], engine.clone());
    let after_two = chain.add_node([3]).to_string();
    let after_three = chain.add_node([4, 5, 6]).to_string();

    let roots = chain.to_root_array();
    assert_eq!(
        after_two,
        MerkleTree::with_engine(roots[..2].to_vec(), engine.clone())
            .unwrap()
            .root()
    );
    assert_eq!(after_three, MerkleTree::with_engine(roots, engine).unwrap().root());
    assert_eq!(chain.root(), after_three);
}

#[test]
fn test_every_snapshot_shares_the_genesis_leaf() {
    let mut chain = MerkleChain::with_genesis(GENESIS, ["first"], HashEngine::default());
    chain.add_node(["second"]);
    chain.add_node(Vec::<LeafValue>::new());

    for node in chain.iter() {
        assert_eq!(node.tree().data()[0], LeafValue::from(GENESIS));
    }
    assert_eq!(chain.tail().unwrap().data(), &[] as &[LeafValue]);
    assert_eq!(chain.head().unwrap().data(), &[LeafValue::from("first")]);
}

#[test]
fn test_neighbour_links_walk_the_chain() {
    let mut chain = MerkleChain::with_genesis(GENESIS, ["a"], HashEngine::default());
    for value in ["b", "c", "d"] {
        chain.add_node([value]);
    }

    let mut forward = Vec::new();
    let mut node = chain.head();
    while let Some(current) = node {
        forward.push(current.root().to_string());
        node = current
            .next_root()
            .and_then(|next| chain.iter().find(|n| n.root() == next));
    }
    assert_eq!(forward, chain.to_root_array());
}

#[test]
fn test_cached_engine_gives_same_chain_root() {
    let cache = Arc::new(HashCache::new());
    let cached = HashEngine::default().with_cache(cache.clone());

    let mut plain = MerkleChain::with_genesis(GENESIS, ["x", "y"], HashEngine::default());
    let mut memo = MerkleChain::with_genesis(GENESIS, ["x", "y"], cached);
    plain.add_node(["x", "y"]);
    memo.add_node(["x", "y"]);

    assert_eq!(plain.root(), memo.root());
    assert!(cache.hits() > 0);
}
