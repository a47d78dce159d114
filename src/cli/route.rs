//! CLI route: single route table and run context.

use crate::chain::MerkleChain;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_chain_json, format_chain_text, format_tree_json, format_tree_text,
};
use crate::config::{ConfigLoader, MerkleConfig};
use crate::directory::{DirectoryHasher, FileErrorPolicy, LocalFileSource};
use crate::error::ApiError;
use crate::hash::{HashAlgorithm, HashEngine};
use crate::tree::MerkleTree;
use crate::types::LeafValue;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and resolved configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: MerkleConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    pub fn with_config(workspace_root: PathBuf, config: MerkleConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            ApiError::ConfigError(messages.join("; "))
        })?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &MerkleConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hash { value, algorithm } => {
                let engine = self.engine(algorithm.as_deref())?;
                Ok(engine.hash_value(&LeafValue::parse_lenient(value)))
            }
            Commands::Root {
                values,
                algorithm,
                levels,
                format,
            } => {
                let engine = self.engine(algorithm.as_deref())?;
                let tree =
                    MerkleTree::with_engine(values.iter().map(|v| LeafValue::parse_lenient(v)), engine)?;
                info!(leaves = tree.len(), root = %tree.root(), "Tree built");
                if format == "json" {
                    format_tree_json(&tree, *levels)
                } else {
                    Ok(format_tree_text(&tree, *levels))
                }
            }
            Commands::File { path, algorithm } => {
                let hasher = DirectoryHasher::new(self.engine(algorithm.as_deref())?);
                let path = self.resolve(path);
                block_on(hasher.hash_file(&path))?.map_err(ApiError::from)
            }
            Commands::Dir {
                path,
                algorithm,
                concurrency,
                tolerate_errors,
                unsorted,
            } => {
                let engine = self.engine(algorithm.as_deref())?;
                let mut options = self.config.directory.hasher_options();
                if let Some(concurrency) = concurrency {
                    options.concurrency = (*concurrency).max(1);
                }
                if *tolerate_errors {
                    options.file_errors = FileErrorPolicy::Tolerate;
                }
                if *unsorted {
                    options.sort_entries = false;
                }
                debug!(?options, "Directory hasher options");

                let source = LocalFileSource::with_config(self.config.directory.walker_config());
                let hasher = DirectoryHasher::with_source(source, engine, options);
                let path = self.resolve(path);
                let root = block_on(hasher.hash_directory(&path))??;
                info!(path = %path.display(), root = %root, "Directory hashed");
                Ok(root)
            }
            Commands::Chain {
                snapshots,
                algorithm,
                genesis,
                format,
            } => {
                let engine = self.engine(algorithm.as_deref())?;
                let chain = build_chain(snapshots, *genesis, engine)?;
                if format == "json" {
                    format_chain_json(&chain)
                } else {
                    Ok(format_chain_text(&chain))
                }
            }
        }
    }

    /// Engine from config, with the algorithm optionally overridden
    fn engine(&self, algorithm: Option<&str>) -> Result<HashEngine, ApiError> {
        let mut hashing = self.config.hashing.clone();
        if let Some(name) = algorithm {
            hashing.algorithm = name.parse::<HashAlgorithm>()?;
        }
        Ok(hashing.engine())
    }

    /// Relative paths are taken from the workspace root
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

fn build_chain(
    snapshots: &[String],
    genesis: Option<i64>,
    engine: HashEngine,
) -> Result<MerkleChain, ApiError> {
    let parsed = snapshots
        .iter()
        .map(|snapshot| {
            serde_json::from_str::<Vec<LeafValue>>(snapshot).map_err(|e| {
                ApiError::InvalidInput(format!(
                    "snapshot must be a JSON array ({}): {}",
                    e, snapshot
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let genesis = genesis.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    let mut parsed = parsed.into_iter();
    let first = parsed
        .next()
        .ok_or_else(|| ApiError::InvalidInput("at least one snapshot is required".to_string()))?;

    let mut chain = MerkleChain::with_genesis(genesis, first, engine);
    for values in parsed {
        chain.add_node(values);
    }
    Ok(chain)
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, ApiError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
    Ok(rt.block_on(future))
}
