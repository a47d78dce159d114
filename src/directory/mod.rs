//! Directory hashing
//!
//! Folds per-file content digests into per-directory roots: every directory's
//! root is the Merkle root over the digests of its immediate children, files
//! contributing their streamed content digest and subdirectories their own
//! root. Empty directories hash to the empty string.

pub mod walker;

pub use walker::{Entry, FileReader, FileSource, LocalFileSource, WalkerConfig};

use crate::error::StorageError;
use crate::hash::{self, HashEngine};
use crate::tree::MerkleTree;
use crate::types::Digest;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// What to do when a single file cannot be opened or read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileErrorPolicy {
    /// Return the error to the caller; the whole walk fails
    #[default]
    Propagate,
    /// Log it and contribute an empty digest to the parent directory
    Tolerate,
}

/// Traversal options that do not depend on the file source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherOptions {
    /// Sort children by path before combining them
    #[serde(default = "default_true")]
    pub sort_entries: bool,
    #[serde(default)]
    pub file_errors: FileErrorPolicy,
    /// Sibling entries hashed at once; results are always combined in listing order
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

impl Default for HasherOptions {
    fn default() -> Self {
        Self {
            sort_entries: default_true(),
            file_errors: FileErrorPolicy::default(),
            concurrency: default_concurrency(),
        }
    }
}

/// Computes file and directory roots through a [`FileSource`]
pub struct DirectoryHasher<S = LocalFileSource> {
    source: S,
    engine: HashEngine,
    options: HasherOptions,
}

impl DirectoryHasher<LocalFileSource> {
    /// Hasher over the local filesystem with default options
    pub fn new(engine: HashEngine) -> Self {
        Self::with_source(LocalFileSource::new(), engine, HasherOptions::default())
    }
}

impl<S: FileSource> DirectoryHasher<S> {
    pub fn with_source(source: S, engine: HashEngine, options: HasherOptions) -> Self {
        Self {
            source,
            engine,
            options,
        }
    }

    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    pub fn options(&self) -> &HasherOptions {
        &self.options
    }

    /// Root of a single file: its streamed content digest
    ///
    /// Under [`FileErrorPolicy::Tolerate`] an unreadable file yields an empty digest.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn hash_file(&self, path: &Path) -> Result<Digest, StorageError> {
        match self.file_root(path).await {
            Ok(root) => Ok(root),
            Err(e) if self.options.file_errors == FileErrorPolicy::Tolerate => {
                warn!("Skipping unreadable file: {}", e);
                Ok(Digest::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn file_root(&self, path: &Path) -> Result<Digest, StorageError> {
        let reader = self.source.open(path).await?;
        let digest = hash::hash_reader(reader, self.engine.algorithm())
            .await
            .map_err(|source| StorageError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let tree = MerkleTree::from_digests([digest], self.engine.clone())?;
        Ok(tree.root().to_string())
    }

    /// Root of a directory: the Merkle root of its children's digests
    ///
    /// Children are visited depth-first. Listing failures always propagate.
    pub fn hash_directory<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<Digest, StorageError>> {
        async move {
            let mut children = self.source.list_children(path).await?;
            if children.is_empty() {
                debug!(path = %path.display(), "Empty directory");
                return Ok(Digest::new());
            }
            if self.options.sort_entries {
                children.sort_by(|a, b| a.path().cmp(b.path()));
            }

            let pending: Vec<_> = children.iter().map(|entry| self.hash_entry(entry)).collect();
            let digests: Vec<Digest> = stream::iter(pending)
                .buffered(self.options.concurrency.max(1))
                .try_collect()
                .await?;

            let tree = MerkleTree::from_digests(digests, self.engine.clone())?;
            debug!(
                path = %path.display(),
                children = children.len(),
                root = %tree.root(),
                "Hashed directory"
            );
            Ok(tree.root().to_string())
        }
        .boxed()
    }

    fn hash_entry<'a>(&'a self, entry: &'a Entry) -> BoxFuture<'a, Result<Digest, StorageError>> {
        match entry {
            Entry::Directory { path } => self.hash_directory(path),
            Entry::File { path, .. } => self.hash_file(path).boxed(),
        }
    }
}
