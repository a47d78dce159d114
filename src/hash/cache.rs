//! Injectable digest cache
//!
//! Memoizes `(algorithm, canonical input) -> digest`. A cache is owned by the
//! caller and shared through `Arc`, so independent engines (and tests) never
//! observe each other's entries.

use super::algorithm::HashAlgorithm;
use crate::types::Digest;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct HashCache {
    entries: RwLock<HashMap<HashAlgorithm, HashMap<String, Digest>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached digest for `input`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, algorithm: HashAlgorithm, input: &str, compute: F) -> Digest
    where
        F: FnOnce() -> Digest,
    {
        if let Some(digest) = self
            .entries
            .read()
            .get(&algorithm)
            .and_then(|bucket| bucket.get(input))
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return digest.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let digest = compute();
        self.entries
            .write()
            .entry(algorithm)
            .or_default()
            .insert(input.to_string(), digest.clone());
        digest
    }

    /// Number of cached digests across all algorithms
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
