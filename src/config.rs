//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, workspace
//! config files, `KEYWATCH_*` environment variables, then CLI flags applied by
//! the caller.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

mod facade;
mod merge;
mod sources;
mod workspace;

pub use facade::ConfigLoader;
pub use workspace::{StoreBackend, StoreConfig};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_RESERVED_KEY: &str = "KEYWATCH_WATCHLIST";
pub const DEFAULT_WATCHED_KEY: &str = "TF_ID";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywatchConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Backing store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Watch list keys
    #[serde(default)]
    pub watch_list: WatchListConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ApiError> {
        self.bind
            .parse()
            .map_err(|e| ApiError::ConfigError(format!("Invalid bind address '{}': {}", self.bind, e)))
    }
}

/// Watch list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchListConfig {
    /// Store key holding the serialized watch list
    #[serde(default = "default_reserved_key")]
    pub reserved_key: String,

    /// Key included in the list before it is first written
    #[serde(default = "default_watched_key")]
    pub default_key: String,
}

fn default_reserved_key() -> String {
    DEFAULT_RESERVED_KEY.to_string()
}

fn default_watched_key() -> String {
    DEFAULT_WATCHED_KEY.to_string()
}

impl Default for WatchListConfig {
    fn default() -> Self {
        Self {
            reserved_key: default_reserved_key(),
            default_key: default_watched_key(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Server(String),
    Store(String),
    WatchList(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Server(msg) => write!(f, "Server: {}", msg),
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::WatchList(msg) => write!(f, "Watch list: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl WatchListConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.reserved_key.is_empty() {
            return Err("Reserved key cannot be empty".to_string());
        }
        if self.default_key.is_empty() {
            return Err("Default key cannot be empty".to_string());
        }
        if self.reserved_key == self.default_key {
            return Err(format!(
                "Reserved key and default key must differ (both '{}')",
                self.reserved_key
            ));
        }
        Ok(())
    }
}

impl KeywatchConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.server.bind_addr() {
            errors.push(ValidationError::Server(e.to_string()));
        }

        if let Err(e) = self.store.validate() {
            errors.push(ValidationError::Store(e));
        }

        if let Err(e) = self.watch_list.validate() {
            errors.push(ValidationError::WatchList(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into one error
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
