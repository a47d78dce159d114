//! Error types for the Merkle hash tree engine.

use std::path::PathBuf;
use thiserror::Error;

/// Tree construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("merkle tree requires at least one leaf")]
    EmptyInput,
}

/// Hash algorithm selection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Filesystem errors raised while hashing files and directories
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path:?}: {message}")]
    DirectoryList { path: PathBuf, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Errors surfaced at the application boundary (config, logging, CLI)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Tree error: {0}")]
    TreeError(#[from] TreeError),

    #[error("Hash error: {0}")]
    HashError(#[from] HashError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
