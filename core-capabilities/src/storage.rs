//! # Storage Capability
//!
//! Async string key-value store over the native `Preferences` plugin or the
//! browser's `localStorage`, plus the offline cache convention built on top.
//!
//! ## Offline cache layout
//!
//! `cache_for_offline("profile", data)` writes
//! `{"data": <data>, "timestamp": <epoch-millis>}` under `offline_profile`
//! (the prefix is configurable). Entries are replaced wholesale.

use std::sync::Arc;

use bridge_traits::{Clock, PreferencesPlugin, WebStorage};
use core_runtime::logging::redact_if_sensitive;
use core_runtime::{CapabilityConfig, PluginSlot};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::probe::PlatformProbe;
use crate::provider::{select, Provider};

/// Timestamped wrapper around cached data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    pub data: T,
    /// Capture instant, Unix epoch milliseconds
    pub timestamp: i64,
}

pub struct StorageCapability {
    probe: PlatformProbe,
    plugin: PluginSlot<dyn PreferencesPlugin>,
    web_storage: Arc<dyn WebStorage>,
    clock: Arc<dyn Clock>,
    offline_prefix: String,
}

impl StorageCapability {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self::with_parts(
            PlatformProbe::new(Arc::clone(&config.shell)),
            config.plugins.preferences.clone(),
            Arc::clone(&config.web_storage),
            Arc::clone(&config.clock),
            config.offline_prefix.clone(),
        )
    }

    pub fn with_parts(
        probe: PlatformProbe,
        plugin: PluginSlot<dyn PreferencesPlugin>,
        web_storage: Arc<dyn WebStorage>,
        clock: Arc<dyn Clock>,
        offline_prefix: impl Into<String>,
    ) -> Self {
        Self {
            probe,
            plugin,
            web_storage,
            clock,
            offline_prefix: offline_prefix.into(),
        }
    }

    #[instrument(skip(self, value))]
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        debug!(value = %redact_if_sensitive(key, value), "Storing item");
        match select(&self.probe, &self.plugin, &self.web_storage)? {
            Provider::Native(plugin) => plugin.set(key, value).await?,
            Provider::Web(storage) => storage.set_item(key, value)?,
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = match select(&self.probe, &self.plugin, &self.web_storage)? {
            Provider::Native(plugin) => plugin.get(key).await?,
            Provider::Web(storage) => storage.get_item(key)?,
        };
        Ok(value)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        match select(&self.probe, &self.plugin, &self.web_storage)? {
            Provider::Native(plugin) => plugin.remove(key).await?,
            Provider::Web(storage) => storage.remove_item(key)?,
        }
        Ok(())
    }

    /// Store `value` as JSON under `key`.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.set_item(key, &encoded).await
    }

    /// Read and decode the JSON stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or the stored value does not
    /// decode as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_item(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "Stored value is not valid JSON for the requested type");
                Ok(None)
            }
        }
    }

    /// Storage key used for offline cache entry `key`.
    pub fn offline_key(&self, key: &str) -> String {
        format!("{}{}", self.offline_prefix, key)
    }

    /// Store `data` with the current time as its capture timestamp.
    pub async fn cache_for_offline<T: Serialize>(&self, key: &str, data: T) -> Result<()> {
        let envelope = CacheEnvelope {
            data,
            timestamp: self.clock.unix_timestamp_millis(),
        };
        self.set_json(&self.offline_key(key), &envelope).await
    }

    /// Read an offline cache entry. Absent and corrupt entries are both `None`.
    pub async fn get_cached<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<CacheEnvelope<T>>> {
        self.get_json(&self.offline_key(key)).await
    }
}
