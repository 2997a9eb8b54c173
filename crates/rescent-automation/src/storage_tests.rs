use super::*;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_store_get_unset_key() {
    let store = MemorySettingsStore::new();
    let value = store.get(StorageScope::Local, "isActive").await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_memory_store_set_and_get() {
    let store = MemorySettingsStore::new();
    store
        .set(StorageScope::Sync, "scrollSpeed", json!(7))
        .await
        .unwrap();

    let value = store.get(StorageScope::Sync, "scrollSpeed").await.unwrap();
    assert_eq!(value, Some(json!(7)));
}

#[tokio::test]
async fn test_scopes_are_isolated() {
    let store = MemorySettingsStore::new();
    store
        .set(StorageScope::Local, "isActive", json!(true))
        .await
        .unwrap();

    assert!(store
        .get(StorageScope::Sync, "isActive")
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        store.get(StorageScope::Local, "isActive").await.unwrap(),
        Some(json!(true))
    );
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let temp = TempDir::new().unwrap();

    {
        let store = FileSettingsStore::new(temp.path()).await.unwrap();
        store
            .set(StorageScope::Sync, "refreshTime", json!(60))
            .await
            .unwrap();
        store
            .set(StorageScope::Local, "isActive", json!(true))
            .await
            .unwrap();
    }

    // A fresh instance, as after a page reload, sees the persisted values.
    let store = FileSettingsStore::new(temp.path()).await.unwrap();
    assert_eq!(
        store.get(StorageScope::Sync, "refreshTime").await.unwrap(),
        Some(json!(60))
    );
    assert_eq!(
        store.get(StorageScope::Local, "isActive").await.unwrap(),
        Some(json!(true))
    );
}

#[tokio::test]
async fn test_file_store_concurrent_sets_keep_both_keys() {
    let temp = TempDir::new().unwrap();
    let store = std::sync::Arc::new(FileSettingsStore::new(temp.path()).await.unwrap());

    // Interleaved writers must not clobber each other's keys.
    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .set(StorageScope::Sync, &format!("key{i}"), json!(i))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap();
    }

    for i in 0..8 {
        assert_eq!(
            store.get(StorageScope::Sync, &format!("key{i}")).await.unwrap(),
            Some(json!(i))
        );
    }
}

#[tokio::test]
async fn test_file_store_overwrites_value() {
    let temp = TempDir::new().unwrap();
    let store = FileSettingsStore::new(temp.path()).await.unwrap();

    store
        .set(StorageScope::Local, "isActive", json!(true))
        .await
        .unwrap();
    store
        .set(StorageScope::Local, "isActive", json!(false))
        .await
        .unwrap();

    assert_eq!(
        store.get(StorageScope::Local, "isActive").await.unwrap(),
        Some(json!(false))
    );
}
