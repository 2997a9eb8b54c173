//! Persistent key-value settings storage.
//!
//! Stands in for `chrome.storage`: two scopes, `sync` (roams with the user
//! profile) and `local` (stays on this machine). Settings persisted here are
//! the only state that survives a page reload.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::{AutomationError, AutomationResult};

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;

/// Which storage area a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Synchronized across the user's browsers.
    Sync,
    /// Local to this machine.
    Local,
}

impl StorageScope {
    fn file_name(&self) -> &'static str {
        match self {
            StorageScope::Sync => "sync.json",
            StorageScope::Local => "local.json",
        }
    }
}

/// Key-value settings storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a value, `None` if the key was never written.
    async fn get(&self, scope: StorageScope, key: &str) -> AutomationResult<Option<Value>>;

    /// Write a value, overwriting any previous one.
    async fn set(&self, scope: StorageScope, key: &str, value: Value) -> AutomationResult<()>;
}

/// In-memory settings store.
pub struct MemorySettingsStore {
    sync: RwLock<HashMap<String, Value>>,
    local: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sync: RwLock::new(HashMap::new()),
            local: RwLock::new(HashMap::new()),
        }
    }

    fn area(&self, scope: StorageScope) -> &RwLock<HashMap<String, Value>> {
        match scope {
            StorageScope::Sync => &self.sync,
            StorageScope::Local => &self.local,
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, scope: StorageScope, key: &str) -> AutomationResult<Option<Value>> {
        let area = self.area(scope).read().await;
        Ok(area.get(key).cloned())
    }

    async fn set(&self, scope: StorageScope, key: &str, value: Value) -> AutomationResult<()> {
        let mut area = self.area(scope).write().await;
        area.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed settings store, one JSON document per scope.
pub struct FileSettingsStore {
    dir: PathBuf,
    // Serializes the read-modify-write in `set`; concurrent writers would
    // otherwise drop each other's keys.
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> AutomationResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| AutomationError::Storage(err.to_string()))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    async fn read_area(&self, scope: StorageScope) -> AutomationResult<HashMap<String, Value>> {
        let path = self.dir.join(scope.file_name());
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| AutomationError::Storage(err.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(AutomationError::Storage(err.to_string())),
        }
    }

    async fn write_area(
        &self,
        scope: StorageScope,
        area: &HashMap<String, Value>,
    ) -> AutomationResult<()> {
        let path = self.dir.join(scope.file_name());
        let bytes = serde_json::to_vec_pretty(area)?;
        fs::write(&path, bytes)
            .await
            .map_err(|err| AutomationError::Storage(err.to_string()))
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, scope: StorageScope, key: &str) -> AutomationResult<Option<Value>> {
        let area = self.read_area(scope).await?;
        Ok(area.get(key).cloned())
    }

    async fn set(&self, scope: StorageScope, key: &str, value: Value) -> AutomationResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut area = self.read_area(scope).await?;
        area.insert(key.to_string(), value);
        debug!("Persisting {:?} key '{}'", scope, key);
        self.write_area(scope, &area).await
    }
}
