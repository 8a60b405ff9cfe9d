use super::*;
use campus::storage::{READ_NOTIFICATIONS_KEY, TOKEN_KEY};
use campus::{ReadOverlay, TokenStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("nested").join("state.json"))
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn set_creates_parent_dirs_and_persists_across_handles() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).set(TOKEN_KEY, "t1");

    let reopened = store_in(&dir);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("t1"));
}

#[test]
fn remove_only_drops_the_named_key() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set(TOKEN_KEY, "t1");
    store.set(READ_NOTIFICATIONS_KEY, "[\"n1\"]");

    store.remove(TOKEN_KEY);

    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(READ_NOTIFICATIONS_KEY).as_deref(), Some("[\"n1\"]"));
}

#[test]
fn corrupt_file_is_treated_as_empty_and_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{{ not json").unwrap();
    let store = FileStore::new(&path);

    assert_eq!(store.get(TOKEN_KEY), None);
    store.set(TOKEN_KEY, "fresh");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
}

#[test]
fn token_and_read_overlay_share_one_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    TokenStore::new(store.clone()).save("t1");
    ReadOverlay::new(store.clone()).mark("n7");

    let raw = fs::read_to_string(store.path()).unwrap();
    let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.get("token").map(String::as_str), Some("t1"));
    assert_eq!(parsed.get("readNotifications").map(String::as_str), Some("[\"n7\"]"));
}
