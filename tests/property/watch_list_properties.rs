//! Property-based tests for watch list invariants

use keywatch::api::{KeyPayload, WatchApi};
use keywatch::store::{KeyValueStore, MemoryKeyValueStore};
use keywatch::watch_list::{WatchList, WatchListRepository};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

const RESERVED: &str = "KEYWATCH_WATCHLIST";
const DEFAULT: &str = "TF_ID";

#[derive(Debug, Clone)]
enum Op {
    Watch(String),
    Unwatch(String),
    Update(String, String),
    Delete(String),
    List,
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(RESERVED.to_string()),
        Just(DEFAULT.to_string()),
        "[a-d]{1,2}",
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        key_strategy().prop_map(Op::Watch),
        key_strategy().prop_map(Op::Unwatch),
        (key_strategy(), "[a-z0-9]{0,6}").prop_map(|(k, v)| Op::Update(k, v)),
        key_strategy().prop_map(Op::Delete),
        Just(Op::List),
    ]
}

fn fresh_api() -> (Arc<dyn KeyValueStore>, WatchApi) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let repo = WatchListRepository::new(Arc::clone(&store), RESERVED, DEFAULT);
    (Arc::clone(&store), WatchApi::new(store, repo))
}

fn apply(api: &WatchApi, op: &Op) {
    match op {
        Op::Watch(k) => api.watch(&KeyPayload::with_key(k.as_str())).unwrap(),
        Op::Unwatch(k) => api.unwatch(&KeyPayload::with_key(k.as_str())).unwrap(),
        Op::Update(k, v) => api
            .update(&KeyPayload::with_value(k.as_str(), v.as_str()))
            .unwrap(),
        Op::Delete(k) => api.delete(&KeyPayload::with_key(k.as_str())).unwrap(),
        Op::List => {
            api.list().unwrap();
        }
    }
}

/// After any operation sequence, list starts from the reserved key (or holds it)
/// and never reports a key twice
#[test]
fn test_list_is_self_tracking_and_unique() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(op_strategy(), 0..24), |ops| {
            let (_store, api) = fresh_api();
            for op in &ops {
                apply(&api, op);
            }

            let keys: Vec<String> = api.list().unwrap().into_iter().map(|e| e.key).collect();
            prop_assert!(keys.contains(&RESERVED.to_string()));

            let unique: HashSet<&String> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len());

            Ok(())
        })
        .unwrap();
}

/// Watching twice equals watching once; unwatching twice equals unwatching once
#[test]
fn test_watch_and_unwatch_idempotence() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(op_strategy(), 0..12), key_strategy()),
            |(prefix, key)| {
                let (store, api) = fresh_api();
                for op in &prefix {
                    apply(&api, op);
                }

                api.watch(&KeyPayload::with_key(key.as_str())).unwrap();
                let once = store.get(RESERVED).unwrap();
                api.watch(&KeyPayload::with_key(key.as_str())).unwrap();
                prop_assert_eq!(store.get(RESERVED).unwrap(), once);

                api.unwatch(&KeyPayload::with_key(key.as_str())).unwrap();
                let once = store.get(RESERVED).unwrap();
                api.unwatch(&KeyPayload::with_key(key.as_str())).unwrap();
                prop_assert_eq!(store.get(RESERVED).unwrap(), once);

                Ok(())
            },
        )
        .unwrap();
}

/// Newly watched keys land at the end in the order they were added
#[test]
fn test_watch_appends_in_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec("[e-z]{1,3}", 0..10), |keys| {
            let (_store, api) = fresh_api();
            for key in &keys {
                api.watch(&KeyPayload::with_key(key.as_str())).unwrap();
            }

            let mut expected = vec![RESERVED.to_string(), DEFAULT.to_string()];
            for key in keys {
                if !expected.contains(&key) {
                    expected.push(key);
                }
            }

            let listed: Vec<String> = api.list().unwrap().into_iter().map(|e| e.key).collect();
            prop_assert_eq!(listed, expected);

            Ok(())
        })
        .unwrap();
}

/// Whatever a stored list holds, parsing yields no duplicates and keeps first occurrences
#[test]
fn test_parse_collapses_duplicates() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec("[a-c]", 0..12), |raw| {
            let json = serde_json::to_string(&raw).unwrap();
            let list = WatchList::parse(&json).unwrap();

            let mut seen = Vec::new();
            for key in &raw {
                if !seen.contains(key) {
                    seen.push(key.clone());
                }
            }
            prop_assert_eq!(list.keys(), seen.as_slice());

            Ok(())
        })
        .unwrap();
}
