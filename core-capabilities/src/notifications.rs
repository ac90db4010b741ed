//! # Notification Capability
//!
//! Permission, delivery channels and activation recording for local
//! notifications. Scheduling notifications is the host's business; this
//! capability only prepares the ground.

use std::sync::Arc;

use bridge_traits::{
    Listener, ListenerHandle, LocalNotificationsPlugin, NotificationAction, NotificationChannel,
    PermissionState, WebPlatform,
};
use core_runtime::{CapabilityConfig, PluginSlot};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::probe::PlatformProbe;
use crate::provider::{native_selected, select, Provider};

pub struct NotificationCapability {
    probe: PlatformProbe,
    plugin: PluginSlot<dyn LocalNotificationsPlugin>,
    web: Arc<dyn WebPlatform>,
    permission: Mutex<PermissionState>,
    activations: Arc<Mutex<Vec<NotificationAction>>>,
    activation_listener: Mutex<Option<Box<dyn ListenerHandle>>>,
}

impl NotificationCapability {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self::with_parts(
            PlatformProbe::new(Arc::clone(&config.shell)),
            config.plugins.local_notifications.clone(),
            Arc::clone(&config.web),
        )
    }

    pub fn with_parts(
        probe: PlatformProbe,
        plugin: PluginSlot<dyn LocalNotificationsPlugin>,
        web: Arc<dyn WebPlatform>,
    ) -> Self {
        Self {
            probe,
            plugin,
            web,
            permission: Mutex::new(PermissionState::Unknown),
            activations: Arc::new(Mutex::new(Vec::new())),
            activation_listener: Mutex::new(None),
        }
    }

    /// Whether calls currently go to the native plugin.
    pub fn uses_native(&self) -> bool {
        native_selected(&self.probe, &self.plugin)
    }

    pub fn permission(&self) -> PermissionState {
        *self.permission.lock()
    }

    /// Ask for notification permission and hold the answer.
    ///
    /// A browser without the `Notification` API resolves to `Denied`.
    #[instrument(skip(self))]
    pub async fn request_permission(&self) -> Result<PermissionState> {
        let state = match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => plugin.request_permissions().await?,
            Provider::Web(web) if web.notifications_supported() => {
                PermissionState::from_display(&web.request_notification_permission().await?)
            }
            Provider::Web(_) => PermissionState::Denied,
        };

        *self.permission.lock() = state;
        info!(?state, "Notification permission");
        Ok(state)
    }

    /// Create or update a delivery channel. Browsers have no channels, so
    /// this does nothing there.
    #[instrument(skip(self, channel), fields(channel = %channel.id))]
    pub async fn create_channel(&self, channel: &NotificationChannel) -> Result<()> {
        match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => {
                plugin.create_channel(channel).await?;
                debug!("Notification channel created");
            }
            Provider::Web(_) => debug!("No notification channels in the browser"),
        }
        Ok(())
    }

    /// Start recording notification activations.
    ///
    /// Activations are kept in memory and logged; nothing acts on them.
    /// Browsers deliver no activation events, so this does nothing there.
    /// Calling again while recording does nothing.
    #[instrument(skip(self))]
    pub async fn record_activations(&self) -> Result<()> {
        if self.activation_listener.lock().is_some() {
            return Ok(());
        }

        let plugin = match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => plugin,
            Provider::Web(_) => return Ok(()),
        };

        let record = Arc::clone(&self.activations);
        let listener: Listener<NotificationAction> = Arc::new(move |action: NotificationAction| {
            info!(
                action_id = %action.action_id,
                notification_id = action.notification_id,
                "Notification activated"
            );
            record.lock().push(action);
        });

        let handle = plugin.add_action_performed_listener(listener).await?;
        let previous = self.activation_listener.lock().replace(handle);
        if let Some(previous) = previous {
            previous.remove().await?;
        }
        Ok(())
    }

    /// Activations recorded so far, oldest first.
    pub fn activations(&self) -> Vec<NotificationAction> {
        self.activations.lock().clone()
    }
}
