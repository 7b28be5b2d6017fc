//! Operation API
//!
//! The six operations of the inspector, expressed as a closed enum and executed
//! against the store and the watch list. Stateless between calls: every
//! operation reads what it needs from the store in real time.

use crate::error::ApiError;
use crate::store::{Entry, EntryView, KeyValueStore};
use crate::watch_list::WatchListRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request body shared by the key-addressed operations.
///
/// Parsing never fails: a malformed body becomes an empty payload so the
/// operation can decide whether a missing key matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPayload {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl KeyPayload {
    pub fn parse(body: &[u8]) -> Self {
        let json: Value = match serde_json::from_slice(body) {
            Ok(json) => json,
            Err(e) => {
                if !body.is_empty() {
                    debug!(error = %e, "Request body is not JSON, treating as empty");
                }
                return KeyPayload::default();
            }
        };

        let key = json.get("key").and_then(key_text);

        let value = match json.get("value") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        KeyPayload { key, value }
    }

    /// Payload addressing `key`. An empty key counts as missing.
    pub fn with_key(key: impl Into<String>) -> Self {
        KeyPayload {
            key: Some(key.into()).filter(|k| !k.is_empty()),
            value: None,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyPayload {
            value: Some(value.into()),
            ..KeyPayload::with_key(key)
        }
    }

    fn require_key(&self) -> Result<&str, ApiError> {
        self.key.as_deref().ok_or(ApiError::KeyRequired)
    }
}

/// Text form of a `key` field. Empty strings, zero, `false`, `null` and
/// structured values count as missing; other numbers and `true` become text.
fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// One inbound operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Get(KeyPayload),
    Watch(KeyPayload),
    Unwatch(KeyPayload),
    Update(KeyPayload),
    Delete(KeyPayload),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get(_) => "get",
            Operation::Watch(_) => "watch",
            Operation::Unwatch(_) => "unwatch",
            Operation::Update(_) => "update",
            Operation::Delete(_) => "delete",
        }
    }
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Entries(Vec<EntryView>),
    Entry(EntryView),
    Message(&'static str),
}

impl Outcome {
    /// JSON body sent to clients
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Entries(entries) => json!({ "data": entries }),
            Outcome::Entry(entry) => json!(entry),
            Outcome::Message(message) => json!({ "message": message }),
        }
    }
}

/// Operation service over a store and its watch list
pub struct WatchApi {
    store: Arc<dyn KeyValueStore>,
    watch_list: WatchListRepository,
}

impl WatchApi {
    pub fn new(store: Arc<dyn KeyValueStore>, watch_list: WatchListRepository) -> Self {
        Self { store, watch_list }
    }

    pub fn watch_list(&self) -> &WatchListRepository {
        &self.watch_list
    }

    /// Run one operation to completion.
    pub fn execute(&self, operation: Operation) -> Result<Outcome, ApiError> {
        debug!(operation = operation.name(), "Executing operation");
        match operation {
            Operation::List => self.list().map(Outcome::Entries),
            Operation::Get(payload) => self.get(&payload).map(Outcome::Entry),
            Operation::Watch(payload) => self.watch(&payload).map(|_| Outcome::Message("Watched")),
            Operation::Unwatch(payload) => {
                self.unwatch(&payload).map(|_| Outcome::Message("Unwatched"))
            }
            Operation::Update(payload) => self.update(&payload).map(|_| Outcome::Message("Saved")),
            Operation::Delete(payload) => self.delete(&payload).map(|_| Outcome::Message("Deleted")),
        }
    }

    /// Every watched key with its current value.
    ///
    /// Repairs the reserved key's self-membership first. A key whose read fails
    /// is reported as absent instead of failing the whole listing.
    pub fn list(&self) -> Result<Vec<EntryView>, ApiError> {
        let reserved_key = self.watch_list.reserved_key().to_string();
        self.watch_list.ensure_includes(&reserved_key)?;
        let list = self.watch_list.load()?;

        let entries = list
            .keys()
            .iter()
            .map(|key| match Entry::read(self.store.as_ref(), key) {
                Ok(entry) => entry.view(),
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to read watched key");
                    Entry::absent(key).view()
                }
            })
            .collect();

        Ok(entries)
    }

    /// Real-time read of a single key.
    pub fn get(&self, payload: &KeyPayload) -> Result<EntryView, ApiError> {
        let key = payload.require_key()?;
        Ok(Entry::read(self.store.as_ref(), key)?.view())
    }

    /// Add the key to the watch list. Without a key this does nothing.
    pub fn watch(&self, payload: &KeyPayload) -> Result<(), ApiError> {
        if let Some(key) = payload.key.as_deref() {
            self.watch_list.add(key)?;
        }
        Ok(())
    }

    /// Remove the key from the watch list. The list is rewritten even when the
    /// key was not a member (or no key was given).
    pub fn unwatch(&self, payload: &KeyPayload) -> Result<(), ApiError> {
        let key = payload.key.as_deref().unwrap_or_default();
        self.watch_list.remove(key)?;
        Ok(())
    }

    /// Write the value, then watch the key. A missing value is stored as `""`.
    pub fn update(&self, payload: &KeyPayload) -> Result<(), ApiError> {
        let key = payload.require_key()?;
        let value = payload.value.as_deref().unwrap_or_default();
        self.store.set(key, value)?;
        self.watch_list.add(key)?;
        Ok(())
    }

    /// Delete the store entry. Watch-list membership is left untouched.
    pub fn delete(&self, payload: &KeyPayload) -> Result<(), ApiError> {
        let Some(key) = payload.key.as_deref() else {
            debug!("Delete without a key, nothing to do");
            return Ok(());
        };
        self.store.delete(key)?;
        Ok(())
    }
}
