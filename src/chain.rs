//! Merkle Chain
//!
//! An append-only sequence of tree snapshots. Every snapshot is seeded with
//! the chain's genesis timestamp as its first leaf, so snapshots with equal
//! data share a root. The chain root is a tree whose leaves are the snapshot
//! roots, head to tail, each hashed like any other leaf value.

use crate::error::TreeError;
use crate::hash::HashEngine;
use crate::tree::MerkleTree;
use crate::types::{Digest, LeafValue};
use tracing::{debug, instrument};

/// One snapshot in the chain
#[derive(Debug, Clone)]
pub struct ChainNode {
    tree: MerkleTree,
    prev_root: Option<Digest>,
    next_root: Option<Digest>,
}

impl ChainNode {
    fn new(genesis_at: i64, values: Vec<LeafValue>, engine: HashEngine) -> Result<Self, TreeError> {
        let seeded = std::iter::once(LeafValue::Integer(genesis_at)).chain(values);
        Ok(Self {
            tree: MerkleTree::with_engine(seeded, engine)?,
            prev_root: None,
            next_root: None,
        })
    }

    pub fn root(&self) -> &str {
        self.tree.root()
    }

    /// Root of the preceding snapshot, `None` at the head
    pub fn prev_root(&self) -> Option<&str> {
        self.prev_root.as_deref()
    }

    /// Root of the following snapshot, `None` at the tail
    pub fn next_root(&self) -> Option<&str> {
        self.next_root.as_deref()
    }

    /// Snapshot data without the genesis leaf
    pub fn data(&self) -> &[LeafValue] {
        &self.tree.data()[1..]
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }
}

#[derive(Debug, Clone)]
pub struct MerkleChain {
    genesis_at: i64,
    engine: HashEngine,
    nodes: Vec<ChainNode>,
    root: Digest,
}

impl MerkleChain {
    /// Start a SHA-256 chain seeded with the current time in milliseconds
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        let genesis_at = chrono::Utc::now().timestamp_millis();
        Self::with_genesis(genesis_at, values, HashEngine::default())
    }

    /// Start a chain with an explicit genesis value
    pub fn with_genesis<I, V>(genesis_at: i64, values: I, engine: HashEngine) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        let mut chain = Self {
            genesis_at,
            engine,
            nodes: Vec::new(),
            root: Digest::new(),
        };
        chain.add_node(values);
        chain
    }

    /// Append a snapshot seeded with `[genesis_at, ...values]` and return the new chain root
    #[instrument(skip_all, fields(genesis_at = self.genesis_at, snapshots = self.nodes.len()))]
    pub fn add_node<I, V>(&mut self, values: I) -> &str
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        let mut node = match ChainNode::new(self.genesis_at, values, self.engine.clone()) {
            Ok(node) => node,
            Err(TreeError::EmptyInput) => unreachable!("genesis leaf is always present"),
        };

        if let Some(tail) = self.nodes.last_mut() {
            tail.next_root = Some(node.root().to_string());
            node.prev_root = Some(tail.root().to_string());
        }
        self.nodes.push(node);

        self.root = match MerkleTree::with_engine(self.to_root_array(), self.engine.clone()) {
            Ok(tree) => tree.root().to_string(),
            Err(TreeError::EmptyInput) => unreachable!("chain holds at least one snapshot"),
        };
        debug!(root = %self.root, "Chain root recomputed");
        &self.root
    }

    /// Snapshot roots from head to tail
    pub fn to_root_array(&self) -> Vec<Digest> {
        self.nodes.iter().map(|node| node.root().to_string()).collect()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn genesis_at(&self) -> i64 {
        self.genesis_at
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a chain starts with one snapshot
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<&ChainNode> {
        self.nodes.first()
    }

    pub fn tail(&self) -> Option<&ChainNode> {
        self.nodes.last()
    }

    pub fn get(&self, index: usize) -> Option<&ChainNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainNode> {
        self.nodes.iter()
    }
}
