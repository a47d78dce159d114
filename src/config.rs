//! Configuration System
//!
//! Layered configuration for hashing, directory traversal and logging.
//! Precedence (lowest to highest): built-in defaults, the global config file,
//! the workspace `config/` files, then `MERKLE__*` environment variables.

use crate::directory::{FileErrorPolicy, HasherOptions, WalkerConfig};
use crate::hash::{HashAlgorithm, HashCache, HashEngine};
use crate::logging::LoggingConfig;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerkleConfig {
    /// Digest settings shared by trees, chains and the directory hasher
    #[serde(default)]
    pub hashing: HashingConfig,

    /// Directory traversal settings
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Memoize digests of repeated inputs
    #[serde(default)]
    pub cache: bool,
}

impl HashingConfig {
    /// Engine for this configuration; each call gets its own cache
    pub fn engine(&self) -> HashEngine {
        let engine = HashEngine::new(self.algorithm);
        if self.cache {
            engine.with_cache(Arc::new(HashCache::new()))
        } else {
            engine
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Sort entries before hashing for reproducible roots across platforms
    #[serde(default = "default_true")]
    pub sort_entries: bool,

    #[serde(default)]
    pub file_errors: FileErrorPolicy,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            sort_entries: default_true(),
            file_errors: FileErrorPolicy::default(),
            concurrency: default_concurrency(),
        }
    }
}

impl DirectoryConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
        }
    }

    pub fn hasher_options(&self) -> HasherOptions {
        HasherOptions {
            sort_entries: self.sort_entries,
            file_errors: self.file_errors,
            concurrency: self.concurrency,
        }
    }

    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }
        if self.ignore_patterns.iter().any(|p| p.is_empty()) {
            return Err("ignore patterns cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Directory(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Directory(msg) => write!(f, "Directory: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl MerkleConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.directory.validate() {
            errors.push(ValidationError::Directory(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`MerkleConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    pub fn load(workspace_root: &Path) -> Result<MerkleConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(merge::merge_policy::environment_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<MerkleConfig, ConfigError> {
        merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
    }
}
