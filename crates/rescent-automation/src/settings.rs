//! User-facing automation settings and their persisted keys.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AutomationResult;
use crate::storage::{SettingsStore, StorageScope};

/// Persisted storage keys, named as the extension stores them.
pub mod keys {
    /// Whether automation is currently active (local scope).
    pub const IS_ACTIVE: &str = "isActive";
    /// Refresh interval in seconds (sync scope).
    pub const REFRESH_TIME: &str = "refreshTime";
    /// Legacy alias for [`REFRESH_TIME`] (sync scope).
    pub const REFRESH_INTERVAL: &str = "refreshInterval";
    /// Scroll speed factor (sync scope).
    pub const SCROLL_SPEED: &str = "scrollSpeed";
    /// Whether continuous scrolling is enabled (local scope).
    pub const CONTINUOUS_SCROLL: &str = "continuousScroll";
}

/// Settings the automation controller runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationSettings {
    /// Seconds between page reloads; `0` disables the refresh cycle.
    #[serde(default = "default_refresh_time")]
    pub refresh_time: u64,

    /// Scroll speed factor consumed by the scroll animator.
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: u32,

    /// Whether to scroll bottom-to-top continuously instead of a single
    /// delayed scroll to the bottom.
    #[serde(default)]
    pub continuous_scroll: bool,
}

fn default_refresh_time() -> u64 {
    30
}

fn default_scroll_speed() -> u32 {
    5
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            refresh_time: default_refresh_time(),
            scroll_speed: default_scroll_speed(),
            continuous_scroll: false,
        }
    }
}

impl AutomationSettings {
    /// Load settings from the store, falling back to defaults for keys that
    /// were never written.
    ///
    /// `refreshTime` is read first, then the legacy `refreshInterval` key.
    pub async fn load(store: &dyn SettingsStore) -> AutomationResult<Self> {
        let defaults = Self::default();

        let refresh_time = match store.get(StorageScope::Sync, keys::REFRESH_TIME).await? {
            Some(value) => value.as_u64(),
            None => store
                .get(StorageScope::Sync, keys::REFRESH_INTERVAL)
                .await?
                .and_then(|value| value.as_u64()),
        }
        .unwrap_or(defaults.refresh_time);

        let scroll_speed = store
            .get(StorageScope::Sync, keys::SCROLL_SPEED)
            .await?
            .and_then(|value| value.as_u64())
            .map(|value| value as u32)
            .unwrap_or(defaults.scroll_speed);

        let continuous_scroll = store
            .get(StorageScope::Local, keys::CONTINUOUS_SCROLL)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(defaults.continuous_scroll);

        Ok(Self {
            refresh_time,
            scroll_speed,
            continuous_scroll,
        })
    }

    /// Persist these settings under their usual keys and scopes.
    pub async fn persist(&self, store: &dyn SettingsStore) -> AutomationResult<()> {
        store
            .set(StorageScope::Sync, keys::REFRESH_TIME, json!(self.refresh_time))
            .await?;
        store
            .set(StorageScope::Sync, keys::SCROLL_SPEED, json!(self.scroll_speed))
            .await?;
        store
            .set(
                StorageScope::Local,
                keys::CONTINUOUS_SCROLL,
                json!(self.continuous_scroll),
            )
            .await?;
        Ok(())
    }
}
