//! Watch List
//!
//! The ordered set of key names the operator tracks, persisted as a JSON array
//! of strings under one reserved key of the same store it indexes.
//!
//! Every mutation reads the full list and rewrites it through
//! [`WatchListRepository::save`]. There is no compare-and-swap: two writers
//! sharing the store can interleave and the last save wins.

use crate::error::StorageError;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered, duplicate-free sequence of watched key names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    keys: Vec<String>,
}

impl WatchList {
    /// Build a list, dropping repeated names (first occurrence wins).
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = WatchList::default();
        for key in keys {
            list.push_back(key.into());
        }
        list
    }

    /// Parse the stored representation. Anything other than a JSON array of
    /// strings is rejected.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let keys: Vec<String> = serde_json::from_str(raw)?;
        Ok(Self::from_keys(keys))
    }

    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.keys.clone()).to_string()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Insert at the front if missing. Returns true when the list changed.
    pub fn push_front(&mut self, key: String) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.insert(0, key);
        true
    }

    /// Append if missing. Returns true when the list changed.
    pub fn push_back(&mut self, key: String) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove every occurrence of `key`. Returns true when the list changed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Repository owning the reserved key under which the watch list is stored.
pub struct WatchListRepository {
    store: Arc<dyn KeyValueStore>,
    reserved_key: String,
    default_key: String,
}

impl WatchListRepository {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        reserved_key: impl Into<String>,
        default_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            reserved_key: reserved_key.into(),
            default_key: default_key.into(),
        }
    }

    /// Store key holding the serialized list
    pub fn reserved_key(&self) -> &str {
        &self.reserved_key
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Value returned while the list has never been written.
    pub fn bootstrap(&self) -> WatchList {
        WatchList::from_keys([self.reserved_key.as_str(), self.default_key.as_str()])
    }

    /// Read the current list.
    ///
    /// A missing (or empty) reserved entry yields the bootstrap list without
    /// persisting it. A stored value that is not UTF-8 or not a JSON array of
    /// strings yields `[reserved_key]`; the next save overwrites the corrupt value.
    pub fn load(&self) -> Result<WatchList, StorageError> {
        let raw = match self.store.get(&self.reserved_key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Ok(self.bootstrap()),
            Err(e @ StorageError::InvalidValue { .. }) => return Ok(self.recover(&e)),
            Err(e) => return Err(e),
        };

        match WatchList::parse(&raw) {
            Ok(list) => Ok(list),
            Err(e) => Ok(self.recover(&e)),
        }
    }

    fn recover(&self, error: &dyn std::fmt::Display) -> WatchList {
        warn!(
            reserved_key = %self.reserved_key,
            error = %error,
            "Stored watch list is corrupt, falling back to the reserved key only"
        );
        WatchList::from_keys([self.reserved_key.as_str()])
    }

    /// Serialize and write the list. Sole write path for list state.
    pub fn save(&self, list: &WatchList) -> Result<(), StorageError> {
        debug!(keys = list.len(), "Saving watch list");
        self.store.set(&self.reserved_key, &list.to_json())
    }

    /// Prepend `key` if missing and persist. Idempotent.
    pub fn ensure_includes(&self, key: &str) -> Result<(), StorageError> {
        let mut list = self.load()?;
        if list.push_front(key.to_string()) {
            debug!(key, "Repairing watch list membership");
            self.save(&list)?;
        }
        Ok(())
    }

    /// Append `key` if missing and persist. Idempotent.
    pub fn add(&self, key: &str) -> Result<(), StorageError> {
        let mut list = self.load()?;
        if list.push_back(key.to_string()) {
            debug!(key, "Key added to watch list");
            self.save(&list)?;
        }
        Ok(())
    }

    /// Remove every occurrence of `key` and persist, whether or not it was present.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut list = self.load()?;
        if list.remove(key) {
            debug!(key, "Key removed from watch list");
        }
        self.save(&list)
    }
}
