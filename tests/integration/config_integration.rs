//! Layered configuration loading against isolated XDG/HOME directories

use super::test_utils::with_xdg_env;
use keywatch::config::{ConfigLoader, StoreBackend, DEFAULT_BIND, DEFAULT_RESERVED_KEY};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_global(test_dir: &TempDir, contents: &str) -> PathBuf {
    let dir = test_dir.path().join("xdg").join("keywatch");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn write_workspace(root: &Path, name: &str, contents: &str) {
    let dir = root.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path())).unwrap();

    assert_eq!(config.server.bind, DEFAULT_BIND);
    assert_eq!(config.store.backend, StoreBackend::Sled);
    assert_eq!(config.watch_list.reserved_key, DEFAULT_RESERVED_KEY);
}

#[test]
fn test_global_file_is_picked_up() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let written = write_global(
        &test_dir,
        r#"
[store]
backend = "memory"
"#,
    );

    let (path, config) = with_xdg_env(&test_dir, || {
        (
            ConfigLoader::xdg_config_path(),
            ConfigLoader::load(workspace.path()),
        )
    });

    assert_eq!(path, Some(written));
    assert_eq!(config.unwrap().store.backend, StoreBackend::Memory);
}

#[test]
fn test_workspace_file_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_global(
        &test_dir,
        r#"
[server]
bind = "127.0.0.1:9001"

[watch_list]
default_key = "GLOBAL_DEFAULT"
"#,
    );
    write_workspace(
        workspace.path(),
        "config.toml",
        r#"
[server]
bind = "127.0.0.1:9002"
"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path())).unwrap();

    assert_eq!(config.server.bind, "127.0.0.1:9002");
    assert_eq!(config.watch_list.default_key, "GLOBAL_DEFAULT");
}

#[test]
fn test_environment_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(
        workspace.path(),
        "config.toml",
        r#"
[watch_list]
default_key = "BASE"
"#,
    );
    write_workspace(
        workspace.path(),
        "staging.toml",
        r#"
[watch_list]
default_key = "STAGING"
"#,
    );

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("KEYWATCH_ENV", "staging");
        ConfigLoader::load(workspace.path())
    })
    .unwrap();

    assert_eq!(config.watch_list.default_key, "STAGING");
}

#[test]
fn test_invalid_workspace_values_fail_validation() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(
        workspace.path(),
        "config.toml",
        r#"
[watch_list]
reserved_key = "SAME"
default_key = "SAME"
"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path())).unwrap();

    assert!(config.ensure_valid().is_err());
}
