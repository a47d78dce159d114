//! Merkle: Incremental Merkle Hash Trees
//!
//! Binary hash trees over ordered values with incremental append and update,
//! genesis-seeded chains of tree snapshots, and directory hashing that folds
//! file content digests into per-directory roots.

pub mod chain;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod hash;
pub mod logging;
pub mod tree;
pub mod types;

pub use chain::{ChainNode, MerkleChain};
pub use directory::{DirectoryHasher, FileErrorPolicy, HasherOptions};
pub use error::{ApiError, HashError, StorageError, TreeError};
pub use hash::{HashAlgorithm, HashCache, HashEngine};
pub use tree::{LeafEncoding, MerkleTree};
pub use types::{Digest, LeafValue};
