//! CLI parse: clap types for Merkle. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Merkle CLI - incremental Merkle trees, snapshot chains and directory hashing
#[derive(Parser)]
#[command(name = "merkle")]
#[command(about = "Build Merkle roots over values, files, directories and snapshot chains")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a single value
    Hash {
        /// Value to hash (JSON if it parses, text otherwise)
        value: String,
        /// Digest algorithm (overrides config)
        #[arg(long)]
        algorithm: Option<String>,
    },
    /// Build a tree over values and print its root
    Root {
        /// Leaf values (JSON if they parse, text otherwise)
        #[arg(required = true)]
        values: Vec<String>,
        /// Digest algorithm (overrides config)
        #[arg(long)]
        algorithm: Option<String>,
        /// Print every level of the tree
        #[arg(long)]
        levels: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Hash a file's content
    File {
        path: PathBuf,
        /// Digest algorithm (overrides config)
        #[arg(long)]
        algorithm: Option<String>,
    },
    /// Hash a directory tree
    Dir {
        path: PathBuf,
        /// Digest algorithm (overrides config)
        #[arg(long)]
        algorithm: Option<String>,
        /// Sibling entries hashed in parallel
        #[arg(long)]
        concurrency: Option<usize>,
        /// Treat unreadable files as empty digests instead of failing
        #[arg(long)]
        tolerate_errors: bool,
        /// Keep the filesystem's listing order instead of sorting by path
        #[arg(long)]
        unsorted: bool,
    },
    /// Build a chain of snapshots and print its root
    Chain {
        /// Snapshots, each a JSON array of values
        #[arg(required = true)]
        snapshots: Vec<String>,
        /// Digest algorithm (overrides config)
        #[arg(long)]
        algorithm: Option<String>,
        /// Genesis value in milliseconds (default: now)
        #[arg(long)]
        genesis: Option<i64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
