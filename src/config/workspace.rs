//! Store location settings and their resolution against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which store adapter backs the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sled,
    Memory,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database path; relative paths resolve against the workspace root
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Named sled tree holding the entries (default tree when unset)
    #[serde(default)]
    pub tree: Option<String>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".keywatch/store")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            tree: None,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == StoreBackend::Sled && self.path.as_os_str().is_empty() {
            return Err("Store path cannot be empty".to_string());
        }
        if matches!(self.tree.as_deref(), Some("")) {
            return Err("Store tree name cannot be empty".to_string());
        }
        Ok(())
    }

    /// Absolute database path for a workspace.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}
