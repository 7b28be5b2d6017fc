//! Workspace initialization for `keywatch init`
//!
//! Writes the built-in defaults to `config/config.toml` under the workspace
//! root so they can be edited in place.

use crate::config::KeywatchConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Skipped(PathBuf),
}

/// Path of the base workspace config file
pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join("config").join("config.toml")
}

/// Render the default configuration as TOML
pub fn default_config_toml() -> Result<String, ApiError> {
    toml::to_string_pretty(&KeywatchConfig::default())
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize default config: {}", e)))
}

/// Write the default config file. An existing file is kept unless `force` is set.
pub fn initialize_workspace(workspace_root: &Path, force: bool) -> Result<InitOutcome, ApiError> {
    let config_path = workspace_config_path(workspace_root);

    if config_path.exists() && !force {
        return Ok(InitOutcome::Skipped(config_path));
    }

    let content = default_config_toml()?;
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    std::fs::write(&config_path, content).map_err(|e| {
        ApiError::ConfigError(format!(
            "Failed to write config file {}: {}",
            config_path.display(),
            e
        ))
    })?;

    info!(path = %config_path.display(), "Wrote default configuration");
    Ok(InitOutcome::Created(config_path))
}

/// Human-readable summary for the CLI
pub fn format_init_outcome(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::Created(path) => format!("Created {}", path.display()),
        InitOutcome::Skipped(path) => format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ),
    }
}
