//! Filesystem access for directory hashing
//!
//! [`FileSource`] is the only boundary the directory hasher depends on: it
//! lists the immediate children of a directory and opens files for streaming.

use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file entry with its path and size
    File { path: PathBuf, size: u64 },
    /// A directory entry with its path
    Directory { path: PathBuf },
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path, .. } | Entry::Directory { path } => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }
}

/// Streamed file content
pub type FileReader = Box<dyn AsyncRead + Send + Unpin>;

/// Directory listing and file reading collaborator
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Immediate children of `path`, in the order the source produces them
    async fn list_children(&self, path: &Path) -> Result<Vec<Entry>, StorageError>;

    /// Open `path` for streaming reads
    async fn open(&self, path: &Path) -> Result<FileReader, StorageError>;
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false; unfollowed links are skipped)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip (e.g., ".git", "target")
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// [`FileSource`] backed by the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource {
    config: WalkerConfig,
}

impl LocalFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Blocking depth-1 listing; [`FileSource::list_children`] runs it on the
    /// blocking pool
    pub fn read_children(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        let list_error = |message: String| StorageError::DirectoryList {
            path: path.to_path_buf(),
            message,
        };

        let metadata = std::fs::metadata(path).map_err(|e| list_error(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(list_error("not a directory".to_string()));
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks);

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| list_error(e.to_string()))?;
            if self.should_ignore(&entry) {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                entries.push(Entry::Directory {
                    path: entry.into_path(),
                });
            } else if file_type.is_file() {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                entries.push(Entry::File {
                    path: entry.into_path(),
                    size,
                });
            }
            // unfollowed symlinks fall through
        }

        Ok(entries)
    }

    /// Check if an entry's name matches an ignore pattern
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}

#[async_trait]
impl FileSource for LocalFileSource {
    async fn list_children(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        let source = self.clone();
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || source.read_children(&owned))
            .await
            .map_err(|e| StorageError::DirectoryList {
                path: path.to_path_buf(),
                message: format!("listing task failed: {}", e),
            })?
    }

    async fn open(&self, path: &Path) -> Result<FileReader, StorageError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| StorageError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Box::new(file))
    }
}
