//! Config loader facade: assembles the layered sources into a `KeywatchConfig`.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::KeywatchConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files,
    /// environment variables.
    pub fn load(workspace_root: &Path) -> Result<KeywatchConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Load configuration from one explicit file, skipping the global and
    /// workspace files. Environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<KeywatchConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Location of the global config file, if one can be determined
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
