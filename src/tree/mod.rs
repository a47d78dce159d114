//! Merkle Hash Tree
//!
//! Builds and incrementally maintains a binary hash tree over an ordered
//! collection of values.

pub mod merkle;

pub use merkle::{LeafEncoding, MerkleTree};
