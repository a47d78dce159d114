//! Incremental Merkle tree over an ordered sequence of leaf values
//!
//! The tree is stored as a flat level table: `levels[0]` holds one digest per
//! leaf and `levels[k + 1]` holds `ceil(levels[k].len() / 2)` parents. A level
//! of odd length pairs its trailing digest with itself (carry rule). Appends
//! and in-place updates repair only the path from the touched leaf to the
//! root, using even/odd index arithmetic to find siblings.

use crate::error::TreeError;
use crate::hash::{canonicalize, HashAlgorithm, HashEngine};
use crate::types::{Digest, LeafValue};
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// How row 0 is derived from leaf values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafEncoding {
    /// Each leaf is hashed: `levels[0][i] = hash(canonical(value))`
    #[default]
    Hashed,
    /// Leaves already are digests and enter row 0 unchanged
    Prehashed,
}

#[derive(Debug, Clone)]
pub struct MerkleTree {
    engine: HashEngine,
    encoding: LeafEncoding,
    data: Vec<LeafValue>,
    levels: Vec<Vec<Digest>>,
    /// Row-0 digest to leaf position; last write wins for duplicate digests
    data_hash_index: HashMap<Digest, usize>,
}

impl MerkleTree {
    /// Build a SHA-256 tree over `values`
    pub fn new<I, V>(values: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        Self::with_engine(values, HashEngine::default())
    }

    pub fn with_algorithm<I, V>(values: I, algorithm: HashAlgorithm) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        Self::with_engine(values, HashEngine::new(algorithm))
    }

    pub fn with_engine<I, V>(values: I, engine: HashEngine) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        Self::build(values, engine, LeafEncoding::Hashed)
    }

    /// Build a tree whose leaves are existing digests
    ///
    /// A single digest is its own root; two digests `h1`, `h2` give
    /// `hash(h1 + h2)`.
    pub fn from_digests<I>(digests: I, engine: HashEngine) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = Digest>,
    {
        Self::build(digests, engine, LeafEncoding::Prehashed)
    }

    fn build<I, V>(values: I, engine: HashEngine, encoding: LeafEncoding) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        let mut tree = Self {
            engine,
            encoding,
            data: values.into_iter().map(Into::into).collect(),
            levels: Vec::new(),
            data_hash_index: HashMap::new(),
        };
        tree.rebuild()?;
        Ok(tree)
    }

    /// Recompute every level from the current data
    #[instrument(skip(self), fields(leaves = self.data.len(), algorithm = %self.engine.algorithm()))]
    fn rebuild(&mut self) -> Result<(), TreeError> {
        if self.data.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        let leaves: Vec<Digest> = self.data.iter().map(|v| self.leaf_digest(v)).collect();
        self.data_hash_index.clear();
        for (position, digest) in leaves.iter().enumerate() {
            self.data_hash_index.insert(digest.clone(), position);
        }

        self.levels.clear();
        self.levels.push(leaves);
        while let Some(row) = self.levels.last().filter(|row| row.len() > 1) {
            let parents = self.reduce(row);
            self.levels.push(parents);
        }

        debug!(depth = self.levels.len(), root = %self.root(), "Built merkle tree");
        Ok(())
    }

    /// Pairwise-reduce one row, hashing a trailing odd digest with itself
    fn reduce(&self, row: &[Digest]) -> Vec<Digest> {
        row.chunks(2)
            .map(|pair| match pair {
                [left, right] => self.engine.hash_pair(left, right),
                [carried] => self.engine.hash_pair(carried, carried),
                _ => unreachable!("chunks(2) yields one or two digests"),
            })
            .collect()
    }

    fn leaf_digest(&self, value: &LeafValue) -> Digest {
        match self.encoding {
            LeafEncoding::Hashed => self.engine.hash_value(value),
            LeafEncoding::Prehashed => canonicalize(value),
        }
    }

    /// Append one leaf and repair the path to the root
    pub fn add_node(&mut self, value: impl Into<LeafValue>) -> &str {
        let value = value.into();
        let digest = self.leaf_digest(&value);
        let mut position = self.data.len();

        self.data.push(value);
        self.data_hash_index.insert(digest.clone(), position);
        self.levels[0].push(digest);

        let mut level = 1;
        while position > 0 {
            let parent = {
                let below = &self.levels[level - 1];
                if position & 1 == 1 {
                    self.engine.hash_pair(&below[position - 1], &below[position])
                } else {
                    // The newest leaf's ancestors are always rightmost, so an
                    // even position has no right sibling.
                    self.engine.hash_pair(&below[position], &below[position])
                }
            };
            position >>= 1;

            if self.levels.len() == level {
                self.levels.push(Vec::new());
            }
            let row = &mut self.levels[level];
            if position < row.len() {
                row[position] = parent;
            } else {
                row.push(parent);
            }
            level += 1;
        }

        trace!(leaves = self.data.len(), depth = self.levels.len(), "Appended leaf");
        self.root()
    }

    /// Append each value in order; same root as rebuilding from scratch
    pub fn add_nodes<I, V>(&mut self, values: I) -> &str
    where
        I: IntoIterator<Item = V>,
        V: Into<LeafValue>,
    {
        for value in values {
            self.add_node(value);
        }
        self.root()
    }

    /// Overwrite the leaf at `index` and repair the path to the root
    ///
    /// Returns `false` without touching the tree when `index` is out of range.
    pub fn update_node_at(&mut self, index: usize, value: impl Into<LeafValue>) -> bool {
        if index >= self.data.len() {
            debug!(index, leaves = self.data.len(), "Update index out of range");
            return false;
        }

        let value = value.into();
        let digest = self.leaf_digest(&value);
        let previous = std::mem::replace(&mut self.levels[0][index], digest.clone());
        if self.data_hash_index.get(&previous) == Some(&index) {
            self.data_hash_index.remove(&previous);
        }
        self.data_hash_index.insert(digest, index);
        self.data[index] = value;

        let mut position = index;
        for level in 1..self.levels.len() {
            let parent = {
                let below = &self.levels[level - 1];
                if position & 1 == 1 {
                    self.engine.hash_pair(&below[position - 1], &below[position])
                } else {
                    let left = &below[position];
                    let right = below.get(position + 1).unwrap_or(left);
                    self.engine.hash_pair(left, right)
                }
            };
            position >>= 1;
            self.levels[level][position] = parent;
        }

        trace!(index, root = %self.root(), "Updated leaf");
        true
    }

    /// Digest of `value` under this tree's algorithm
    pub fn create_hash(&self, value: &LeafValue) -> Digest {
        self.engine.hash_value(value)
    }

    /// Leaf whose row-0 digest is `digest`, if any
    pub fn get_data_from_hash(&self, digest: &str) -> Option<&LeafValue> {
        self.data_hash_index
            .get(digest)
            .and_then(|&position| self.data.get(position))
    }

    /// Number of levels (row 0 included) a tree over `length` leaves has
    pub fn max_depth_from_length(length: usize) -> usize {
        let mut remaining = length;
        let mut depth = 1;
        while remaining > 1 {
            remaining = (remaining + 1) >> 1;
            depth += 1;
        }
        depth
    }

    pub fn root(&self) -> &str {
        self.levels
            .last()
            .and_then(|row| row.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Full level table, leaves first
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn data(&self) -> &[LeafValue] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.engine.algorithm()
    }

    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    pub fn leaf_encoding(&self) -> LeafEncoding {
        self.encoding
    }
}
