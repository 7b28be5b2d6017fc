//! CLI route: single route table and run context. Dispatches to the operation API and presentation.

use crate::api::{KeyPayload, Operation, Outcome, WatchApi};
use crate::config::{ConfigLoader, KeywatchConfig, ServerConfig, StoreBackend, StoreConfig};
use crate::error::{ApiError, StorageError};
use crate::server;
use crate::store::{KeyValueStore, MemoryKeyValueStore, SledKeyValueStore};
use crate::watch_list::WatchListRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_entries_text, format_entry_text, format_json};

/// Run one command. `init` only writes files, so it runs without opening the store.
pub fn run(
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    command: &Commands,
) -> Result<String, ApiError> {
    if let Commands::Init { force } = command {
        return init_workspace(&workspace_root, *force);
    }
    RunContext::new(workspace_root, config_path)?.execute(command)
}

fn init_workspace(workspace_root: &Path, force: bool) -> Result<String, ApiError> {
    let outcome = crate::init::initialize_workspace(workspace_root, force)?;
    Ok(crate::init::format_init_outcome(&outcome))
}

/// Runtime context for CLI execution: loaded config, opened store, operation API.
pub struct RunContext {
    api: WatchApi,
    store: Arc<dyn KeyValueStore>,
    config: KeywatchConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::from_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(workspace_root: PathBuf, config: KeywatchConfig) -> Result<Self, ApiError> {
        config.ensure_valid()?;

        let store = open_store(&config.store, &workspace_root)?;
        let watch_list = WatchListRepository::new(
            Arc::clone(&store),
            config.watch_list.reserved_key.clone(),
            config.watch_list.default_key.clone(),
        );
        let api = WatchApi::new(Arc::clone(&store), watch_list);

        Ok(Self {
            api,
            store,
            config,
            workspace_root,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(self, command: &Commands) -> Result<String, ApiError> {
        debug!(?command, "Executing command");
        match command {
            Commands::Serve { bind } => self.serve(bind.clone()),
            Commands::List { format } => {
                let entries = self.api.list()?;
                if format == "json" {
                    format_json(&Outcome::Entries(entries).to_json())
                } else {
                    Ok(format_entries_text(&entries))
                }
            }
            Commands::Get { key, format } => {
                let entry = self.api.get(&KeyPayload::with_key(key.as_str()))?;
                if format == "json" {
                    format_json(&entry)
                } else {
                    Ok(format_entry_text(&entry))
                }
            }
            Commands::Watch { key } => {
                self.mutate(Operation::Watch(KeyPayload::with_key(key.as_str())))
            }
            Commands::Unwatch { key } => {
                self.mutate(Operation::Unwatch(KeyPayload::with_key(key.as_str())))
            }
            Commands::Set { key, value } => self.mutate(Operation::Update(
                KeyPayload::with_value(key.as_str(), value.as_str()),
            )),
            Commands::Delete { key } => {
                self.mutate(Operation::Delete(KeyPayload::with_key(key.as_str())))
            }
            Commands::Init { force } => init_workspace(&self.workspace_root, *force),
        }
    }

    fn mutate(&self, operation: Operation) -> Result<String, ApiError> {
        let outcome = self.api.execute(operation)?;
        self.store.flush()?;
        match outcome {
            Outcome::Message(message) => Ok(message.to_string()),
            other => format_json(&other.to_json()),
        }
    }

    fn serve(self, bind: Option<String>) -> Result<String, ApiError> {
        let server_config = ServerConfig {
            bind: bind.unwrap_or_else(|| self.config.server.bind.clone()),
        };
        let addr = server_config.bind_addr()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ServerError(format!("Failed to start runtime: {}", e)))?;

        let store = Arc::clone(&self.store);
        runtime.block_on(server::serve(addr, self.api))?;
        store.flush()?;

        Ok(format!("Server on {} stopped", addr))
    }
}

/// Open the configured store adapter.
fn open_store(
    config: &StoreConfig,
    workspace_root: &Path,
) -> Result<Arc<dyn KeyValueStore>, ApiError> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using the in-memory store; nothing will persist after exit");
            Ok(Arc::new(MemoryKeyValueStore::new()))
        }
        StoreBackend::Sled => {
            let store_path = config.resolve_path(workspace_root);
            std::fs::create_dir_all(&store_path)
                .map_err(|e| ApiError::StorageError(StorageError::IoError(e)))?;
            info!(path = %store_path.display(), tree = ?config.tree, "Opening sled store");

            let store = match config.tree.as_deref() {
                Some(tree) => SledKeyValueStore::with_tree(&store_path, tree)?,
                None => SledKeyValueStore::new(&store_path)?,
            };
            Ok(Arc::new(store))
        }
    }
}
