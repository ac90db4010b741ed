//! # Network Capability
//!
//! Current connectivity plus a standing change subscription.
//!
//! The native path seeds state with one status query and then overwrites it
//! on every plugin event. The browser path follows `online`/`offline` window
//! events, which only carry the connected flag, so the connection type is
//! left as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bridge_traits::{
    ConnectionStatus, ConnectivityEvent, Listener, ListenerHandle, NetworkPlugin, WebPlatform,
};
use core_runtime::{CapabilityConfig, PluginSlot};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::probe::PlatformProbe;
use crate::provider::{select, Provider};

pub const UNKNOWN_CONNECTION_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub connected: bool,
    /// Free-form (`"wifi"`, `"cellular"`, `"none"`, ...)
    pub connection_type: String,
}

impl NetworkStatus {
    pub fn new(connected: bool) -> Self {
        Self {
            connected,
            connection_type: UNKNOWN_CONNECTION_TYPE.to_string(),
        }
    }
}

impl From<ConnectionStatus> for NetworkStatus {
    fn from(status: ConnectionStatus) -> Self {
        Self {
            connected: status.connected,
            connection_type: status.connection_type,
        }
    }
}

pub struct NetworkCapability {
    probe: PlatformProbe,
    plugin: PluginSlot<dyn NetworkPlugin>,
    web: Arc<dyn WebPlatform>,
    status: Arc<Mutex<NetworkStatus>>,
    watching: AtomicBool,
    watcher: Mutex<Option<Box<dyn ListenerHandle>>>,
}

impl NetworkCapability {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self::with_parts(
            PlatformProbe::new(Arc::clone(&config.shell)),
            config.plugins.network.clone(),
            Arc::clone(&config.web),
        )
    }

    /// Initial state comes from the navigator online signal.
    pub fn with_parts(
        probe: PlatformProbe,
        plugin: PluginSlot<dyn NetworkPlugin>,
        web: Arc<dyn WebPlatform>,
    ) -> Self {
        let status = NetworkStatus::new(web.is_online());
        Self {
            probe,
            plugin,
            web,
            status: Arc::new(Mutex::new(status)),
            watching: AtomicBool::new(false),
            watcher: Mutex::new(None),
        }
    }

    /// Current connectivity snapshot.
    pub fn status(&self) -> NetworkStatus {
        self.status.lock().clone()
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.lock().is_some()
    }

    /// Start following connectivity changes for the rest of the process.
    ///
    /// Calling again while a watcher is installed (or being installed) does
    /// nothing. A failed attempt can be retried.
    #[instrument(skip(self))]
    pub async fn watch_network(&self) -> Result<()> {
        if self.watching.swap(true, Ordering::SeqCst) {
            debug!("Network watcher already installed");
            return Ok(());
        }

        match self.subscribe().await {
            Ok(handle) => {
                *self.watcher.lock() = Some(handle);
                info!(status = ?self.status(), "Network watcher installed");
                Ok(())
            }
            Err(err) => {
                self.watching.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    async fn subscribe(&self) -> Result<Box<dyn ListenerHandle>> {
        match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => {
                let seed = plugin.get_status().await?;
                *self.status.lock() = seed.into();

                let status = Arc::clone(&self.status);
                let listener: Listener<ConnectionStatus> = Arc::new(move |change: ConnectionStatus| {
                    debug!(
                        connected = change.connected,
                        kind = %change.connection_type,
                        "Network status changed"
                    );
                    *status.lock() = change.into();
                });
                Ok(plugin.add_status_listener(listener).await?)
            }
            Provider::Web(web) => {
                self.status.lock().connected = web.is_online();

                let status = Arc::clone(&self.status);
                let listener: Listener<ConnectivityEvent> = Arc::new(move |event: ConnectivityEvent| {
                    let connected = matches!(event, ConnectivityEvent::Online);
                    debug!(connected, "Browser connectivity changed");
                    status.lock().connected = connected;
                });
                Ok(web.add_connectivity_listener(listener)?)
            }
        }
    }
}
