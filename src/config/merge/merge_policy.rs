//! Merge rules: defaults, override order, conflict handling.

use crate::config::{DEFAULT_BIND, DEFAULT_RESERVED_KEY, DEFAULT_WATCHED_KEY};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override earlier ones key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("server.bind", DEFAULT_BIND)?
        .set_default("store.backend", "sled")?
        .set_default("store.path", ".keywatch/store")?
        .set_default("watch_list.reserved_key", DEFAULT_RESERVED_KEY)?
        .set_default("watch_list.default_key", DEFAULT_WATCHED_KEY)
}
