//! Per-workspace config layers under `<workspace>/config/`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Profile used when `MERKLE_ENV` is unset
pub const DEFAULT_PROFILE: &str = "development";

/// Candidate workspace config files, base layer first.
///
/// `config/config.toml` is always a candidate; `config/<profile>.toml` layers
/// on top of it, where the profile comes from `MERKLE_ENV`.
pub fn workspace_config_paths(workspace_root: &Path, profile: Option<&str>) -> Vec<PathBuf> {
    let dir = workspace_root.join("config");
    let profile = profile.unwrap_or(DEFAULT_PROFILE);
    vec![dir.join("config.toml"), dir.join(format!("{}.toml", profile))]
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = std::env::var("MERKLE_ENV").ok();
    let layered = workspace_config_paths(workspace_root, profile.as_deref())
        .into_iter()
        .filter(|path| {
            let present = path.is_file();
            if !present {
                debug!(config_path = %path.display(), "Workspace config layer absent");
            }
            present
        })
        .fold(builder, |builder, path| builder.add_source(File::from(path)));
    Ok(layered)
}
