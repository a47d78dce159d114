//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("hashing.algorithm", "sha256")?
        .set_default("hashing.cache", false)?
        .set_default("directory.follow_symlinks", false)?
        .set_default("directory.ignore_patterns", Vec::<String>::new())?
        .set_default("directory.sort_entries", true)?
        .set_default("directory.file_errors", "propagate")?
        .set_default("directory.concurrency", 1)
}

/// Environment overrides, highest precedence: `MERKLE__HASHING__ALGORITHM=md5`.
pub fn environment_source() -> Environment {
    Environment::with_prefix("MERKLE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("directory.ignore_patterns")
}
