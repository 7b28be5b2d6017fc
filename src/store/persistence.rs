//! Persistence layer: sled-backed key-value store

use crate::error::StorageError;
use crate::store::KeyValueStore;
use sled;
use std::path::Path;

/// Sled-based implementation of KeyValueStore
pub struct SledKeyValueStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledKeyValueStore {
    /// Open (or create) a sled database at the given path, using its default tree.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = open_db(path.as_ref())?;
        Ok(Self::from_db(db))
    }

    /// Open a sled database and address entries inside the named tree.
    pub fn with_tree<P: AsRef<Path>>(path: P, tree: &str) -> Result<Self, StorageError> {
        let db = open_db(path.as_ref())?;
        let tree = db.open_tree(tree).map_err(|e| {
            StorageError::Backend(format!("Failed to open sled tree '{}': {}", tree, e))
        })?;
        Ok(Self { db, tree })
    }

    /// Wrap an already opened database.
    pub fn from_db(db: sled::Db) -> Self {
        let tree = (*db).clone();
        Self { db, tree }
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

fn open_db(path: &Path) -> Result<sled::Db, StorageError> {
    sled::open(path)
        .map_err(|e| StorageError::Backend(format!("Failed to open sled database: {}", e)))
}

impl KeyValueStore for SledKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self
            .tree
            .get(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to get '{}': {}", key, e)))?
        {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    StorageError::InvalidValue {
                        key: key.to_string(),
                    }
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to set '{}': {}", key, e)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.tree
            .remove(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to delete '{}': {}", key, e)))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.tree
            .flush()
            .map_err(|e| StorageError::Backend(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}
