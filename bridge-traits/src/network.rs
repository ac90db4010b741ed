//! Network Monitoring Abstraction
//!
//! Provides connectivity status and change notifications from the native
//! network plugin.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    platform::{Listener, ListenerHandle, PlatformSendSync},
};

/// Connectivity snapshot delivered by `Network.getStatus` and every
/// `networkStatusChange` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    /// Free-form category (`wifi`, `cellular`, `none`, `unknown`, ...)
    pub connection_type: String,
}

/// Native network plugin.
///
/// # Platform Support
///
/// - **iOS**: Network framework path monitor
/// - **Android**: ConnectivityManager callbacks
/// - **Web**: not provided; browsers only expose online/offline transitions
///   through [`WebPlatform`](crate::web::WebPlatform)
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::NetworkPlugin;
/// use std::sync::Arc;
///
/// async fn log_changes(plugin: &dyn NetworkPlugin) -> Result<()> {
///     let handle = plugin
///         .add_status_listener(Arc::new(|status| println!("{status:?}")))
///         .await?;
///     // keep `handle` to remove the listener later
///     Ok(())
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait NetworkPlugin: PlatformSendSync {
    /// Get current connection status
    async fn get_status(&self) -> Result<ConnectionStatus>;

    /// Subscribe to connection status changes
    ///
    /// The listener fires with the full status on every change.
    async fn add_status_listener(
        &self,
        listener: Listener<ConnectionStatus>,
    ) -> Result<Box<dyn ListenerHandle>>;
}
