//! Watch list persistence against the sled backend

use super::test_utils::{api_over, sled_api, DEFAULT, RESERVED};
use keywatch::api::KeyPayload;
use keywatch::router::{handle, ReplyBody};
use keywatch::store::SledKeyValueStore;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn keys(api: &keywatch::api::WatchApi) -> Vec<String> {
    api.list().unwrap().into_iter().map(|e| e.key).collect()
}

#[test]
fn test_watch_list_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let (store, api) = sled_api(temp_dir.path());
        api.watch(&KeyPayload::with_key("a")).unwrap();
        api.update(&KeyPayload::with_value("b", "1")).unwrap();
        store.flush().unwrap();
    }

    let (_store, api) = sled_api(temp_dir.path());
    assert_eq!(keys(&api), vec![RESERVED, DEFAULT, "a", "b"]);
    let b = api.get(&KeyPayload::with_key("b")).unwrap();
    assert_eq!(b.value, "1");
    assert!(b.exists);
}

#[test]
fn test_list_value_is_stored_as_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let (store, api) = sled_api(temp_dir.path());

    api.watch(&KeyPayload::with_key("a")).unwrap();

    let raw = store.get(RESERVED).unwrap().unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec![RESERVED, DEFAULT, "a"]);
}

#[test]
fn test_corrupt_list_in_sled_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let (store, api) = sled_api(temp_dir.path());
    store.set(RESERVED, r#"{"not":"a list"}"#).unwrap();

    assert_eq!(keys(&api), vec![RESERVED]);
}

#[test]
fn test_non_utf8_value_is_listed_as_absent() {
    let temp_dir = TempDir::new().unwrap();
    let sled = SledKeyValueStore::new(temp_dir.path()).unwrap();
    sled.db().insert(b"binary", &[0xc3, 0x28][..]).unwrap();
    let (_store, api) = api_over(Arc::new(sled));

    api.watch(&KeyPayload::with_key("binary")).unwrap();

    let entries = api.list().unwrap();
    let binary = entries.iter().find(|e| e.key == "binary").unwrap();
    assert!(!binary.exists);
    assert_eq!(binary.value, "");
}

#[test]
fn test_named_trees_keep_separate_watch_lists() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("db");

    {
        let (_store, api) =
            api_over(Arc::new(SledKeyValueStore::with_tree(&db, "first").unwrap()));
        api.watch(&KeyPayload::with_key("only-first")).unwrap();
    }

    let (_store, api) = api_over(Arc::new(SledKeyValueStore::with_tree(&db, "second").unwrap()));
    assert!(!keys(&api).contains(&"only-first".to_string()));
}

#[test]
fn test_non_utf8_watch_list_recovers_and_is_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let sled = SledKeyValueStore::new(temp_dir.path()).unwrap();
    sled.db()
        .insert(RESERVED.as_bytes(), &[0xff, 0xfe][..])
        .unwrap();
    let (store, api) = api_over(Arc::new(sled));

    let reply = handle(&api, "GET", "/db/api/list", b"");
    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        ReplyBody::Json(json!({
            "data": [{ "key": RESERVED, "value": "", "exists": false }]
        }))
    );

    let reply = handle(&api, "POST", "/db/api/watch", br#"{"key":"a"}"#);
    assert_eq!(reply.status, 200);
    assert_eq!(
        store.get(RESERVED).unwrap().as_deref(),
        Some(r#"["KEYWATCH_WATCHLIST","a"]"#)
    );
    assert_eq!(keys(&api), vec![RESERVED, "a"]);
}
