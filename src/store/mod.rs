//! Key-Value Store Adapter
//!
//! Capability interface over the external key-value store. The core only ever
//! reads, writes and deletes single keys; there is no listing primitive.

pub mod memory;
pub mod persistence;

pub use memory::MemoryKeyValueStore;
pub use persistence::SledKeyValueStore;

use crate::error::StorageError;
use serde::Serialize;

/// Key-value store interface
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when the store has no entry.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the entry for `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Make pending writes durable. Backends without buffering do nothing.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Entry: a key and the value the store currently holds for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Option<String>,
}

impl Entry {
    /// Read `key` from the store in real time.
    pub fn read(store: &dyn KeyValueStore, key: &str) -> Result<Self, StorageError> {
        Ok(Entry {
            key: key.to_string(),
            value: store.get(key)?,
        })
    }

    /// An entry the store has no value for.
    pub fn absent(key: &str) -> Self {
        Entry {
            key: key.to_string(),
            value: None,
        }
    }

    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Wire view: an absent value is reported as `""` with `exists: false`.
    pub fn view(&self) -> EntryView {
        EntryView {
            key: self.key.clone(),
            value: self.value.clone().unwrap_or_default(),
            exists: self.exists(),
        }
    }
}

/// Serialized form of an entry in API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
    pub exists: bool,
}
