//! Shared test utilities for integration tests
//!
//! Store/API builders plus isolated XDG environment handling for config tests.

use keywatch::api::WatchApi;
use keywatch::store::{KeyValueStore, MemoryKeyValueStore, SledKeyValueStore};
use keywatch::watch_list::WatchListRepository;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const RESERVED: &str = "KEYWATCH_WATCHLIST";
pub const DEFAULT: &str = "TF_ID";

/// API over a fresh in-memory store
pub fn memory_api() -> (Arc<dyn KeyValueStore>, WatchApi) {
    api_over(Arc::new(MemoryKeyValueStore::new()))
}

/// API over a sled database at `path`
pub fn sled_api(path: &Path) -> (Arc<dyn KeyValueStore>, WatchApi) {
    api_over(Arc::new(SledKeyValueStore::new(path).unwrap()))
}

pub fn api_over(store: Arc<dyn KeyValueStore>) -> (Arc<dyn KeyValueStore>, WatchApi) {
    let watch_list = WatchListRepository::new(Arc::clone(&store), RESERVED, DEFAULT);
    let api = WatchApi::new(Arc::clone(&store), watch_list);
    (store, api)
}

/// Global mutex to serialize environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    keywatch_env: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            keywatch_env: std::env::var("KEYWATCH_ENV").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("KEYWATCH_ENV", self.keywatch_env);
    }
}

fn restore_var(name: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(name, orig),
        None => std::env::remove_var(name),
    }
}

/// Run `f` with XDG_CONFIG_HOME and HOME pointed into `test_dir`.
///
/// The global config file location becomes `<test_dir>/xdg/keywatch/config.toml`.
/// Original environment variables are restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("xdg");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    std::env::remove_var("KEYWATCH_ENV");

    let result = f();

    env_state.restore();

    result
}
