//! Typed bindings for the native plugins the capability layer drives.
//!
//! Each binding wraps a [`CapacitorPlugin`] and translates between the
//! plugin's JS payloads and the `bridge-traits` types.

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult, plugins, AccelEvent, AppPlugin, BackButtonEvent, BatteryInfo,
    ConnectionStatus, DevicePlugin, Listener, ListenerHandle, LocalNotificationsPlugin,
    MotionPlugin, NativeDeviceInfo, NetworkPlugin, NotificationAction, NotificationChannel,
    PermissionState, PreferencesPlugin, SplashScreenPlugin, StatusBarPlugin, StatusBarStyle,
};
use serde::{Deserialize, Serialize};

use crate::capacitor::{decode, CapacitorPlugin};
use crate::error::WasmResult;

/// Placeholder for calls without options.
const NO_OPTIONS: Option<&()> = None;

#[derive(Serialize)]
struct KeyOptions<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct KeyValueOptions<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
struct ValueResult {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Serialize)]
struct StyleOptions {
    style: StatusBarStyle,
}

#[derive(Serialize)]
struct ColorOptions<'a> {
    color: &'a str,
}

#[derive(Deserialize)]
struct DisplayResult {
    display: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionPerformed {
    action_id: String,
    notification: NotificationRef,
}

#[derive(Deserialize)]
struct NotificationRef {
    id: i64,
}

impl From<ActionPerformed> for NotificationAction {
    fn from(event: ActionPerformed) -> Self {
        Self {
            action_id: event.action_id,
            notification_id: event.notification.id,
        }
    }
}

macro_rules! plugin_binding {
    ($(#[$meta:meta])* $binding:ident, $name:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $binding {
            plugin: CapacitorPlugin,
        }

        impl $binding {
            pub fn resolve() -> WasmResult<Self> {
                Ok(Self {
                    plugin: CapacitorPlugin::resolve($name)?,
                })
            }
        }
    };
}

plugin_binding!(
    /// `Device` plugin binding.
    CapacitorDevice,
    plugins::DEVICE
);
plugin_binding!(
    /// `Network` plugin binding.
    CapacitorNetwork,
    plugins::NETWORK
);
plugin_binding!(
    /// `Motion` plugin binding.
    CapacitorMotion,
    plugins::MOTION
);
plugin_binding!(
    /// `Preferences` plugin binding.
    CapacitorPreferences,
    plugins::PREFERENCES
);
plugin_binding!(
    /// `StatusBar` plugin binding.
    CapacitorStatusBar,
    plugins::STATUS_BAR
);
plugin_binding!(
    /// `SplashScreen` plugin binding.
    CapacitorSplashScreen,
    plugins::SPLASH_SCREEN
);
plugin_binding!(
    /// `App` plugin binding.
    CapacitorApp,
    plugins::APP
);
plugin_binding!(
    /// `LocalNotifications` plugin binding.
    CapacitorLocalNotifications,
    plugins::LOCAL_NOTIFICATIONS
);

#[async_trait(?Send)]
impl DevicePlugin for CapacitorDevice {
    async fn get_info(&self) -> BridgeResult<NativeDeviceInfo> {
        Ok(self.plugin.call_as("getInfo", NO_OPTIONS).await?)
    }

    async fn get_battery_info(&self) -> BridgeResult<BatteryInfo> {
        Ok(self.plugin.call_as("getBatteryInfo", NO_OPTIONS).await?)
    }
}

#[async_trait(?Send)]
impl NetworkPlugin for CapacitorNetwork {
    async fn get_status(&self) -> BridgeResult<ConnectionStatus> {
        Ok(self.plugin.call_as("getStatus", NO_OPTIONS).await?)
    }

    async fn add_status_listener(
        &self,
        listener: Listener<ConnectionStatus>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self
            .plugin
            .add_listener("networkStatusChange", decode, listener)
            .await?)
    }
}

#[async_trait(?Send)]
impl MotionPlugin for CapacitorMotion {
    async fn add_accel_listener(
        &self,
        listener: Listener<AccelEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self.plugin.add_listener("accel", decode, listener).await?)
    }
}

#[async_trait(?Send)]
impl PreferencesPlugin for CapacitorPreferences {
    async fn get(&self, key: &str) -> BridgeResult<Option<String>> {
        let result: ValueResult = self
            .plugin
            .call_as("get", Some(&KeyOptions { key }))
            .await?;
        Ok(result.value)
    }

    async fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.plugin
            .call("set", Some(&KeyValueOptions { key, value }))
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> BridgeResult<()> {
        self.plugin.call("remove", Some(&KeyOptions { key })).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl StatusBarPlugin for CapacitorStatusBar {
    async fn set_style(&self, style: StatusBarStyle) -> BridgeResult<()> {
        self.plugin
            .call("setStyle", Some(&StyleOptions { style }))
            .await?;
        Ok(())
    }

    async fn set_background_color(&self, color: &str) -> BridgeResult<()> {
        self.plugin
            .call("setBackgroundColor", Some(&ColorOptions { color }))
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl SplashScreenPlugin for CapacitorSplashScreen {
    async fn hide(&self) -> BridgeResult<()> {
        self.plugin.call("hide", NO_OPTIONS).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AppPlugin for CapacitorApp {
    async fn add_back_button_listener(
        &self,
        listener: Listener<BackButtonEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self.plugin.add_listener("backButton", decode, listener).await?)
    }

    async fn minimize_app(&self) -> BridgeResult<()> {
        self.plugin.call("minimizeApp", NO_OPTIONS).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl LocalNotificationsPlugin for CapacitorLocalNotifications {
    async fn create_channel(&self, channel: &NotificationChannel) -> BridgeResult<()> {
        self.plugin.call("createChannel", Some(channel)).await?;
        Ok(())
    }

    async fn request_permissions(&self) -> BridgeResult<PermissionState> {
        let result: DisplayResult = self.plugin.call_as("requestPermissions", NO_OPTIONS).await?;
        Ok(PermissionState::from_display(&result.display))
    }

    async fn add_action_performed_listener(
        &self,
        listener: Listener<NotificationAction>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self
            .plugin
            .add_listener(
                "localNotificationActionPerformed",
                |payload| decode::<ActionPerformed>(payload).map(NotificationAction::from),
                listener,
            )
            .await?)
    }
}

