//! Mocks shared by the unit tests in this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult, AccelEvent, AppPlugin, BackButtonEvent, BatteryInfo,
    ConnectionStatus, ConnectivityEvent, DeviceMotion, DevicePlugin, Listener, ListenerHandle,
    LocalNotificationsPlugin, MotionPlugin, MotionSupport, NativeDeviceInfo, NetworkPlugin,
    NotificationAction, NotificationChannel, PermissionState, PreferencesPlugin,
    ShellEnvironment, SplashScreenPlugin, StatusBarPlugin, StatusBarStyle, WebPlatform,
};
use mockall::mock;

use crate::probe::PlatformProbe;

/// Shell answering from fixed values.
pub struct FakeShell {
    pub native: bool,
    pub platform: &'static str,
    pub plugins: Vec<&'static str>,
}

impl FakeShell {
    pub fn native(platform: &'static str, plugins: &[&'static str]) -> Self {
        Self {
            native: true,
            platform,
            plugins: plugins.to_vec(),
        }
    }

    pub fn browser() -> Self {
        Self {
            native: false,
            platform: "web",
            plugins: Vec::new(),
        }
    }

    pub fn probe(self) -> PlatformProbe {
        PlatformProbe::new(Arc::new(self))
    }
}

impl ShellEnvironment for FakeShell {
    fn is_native_platform(&self) -> bool {
        self.native
    }

    fn platform(&self) -> String {
        self.platform.to_string()
    }

    fn is_plugin_available(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| *plugin == name)
    }
}

/// Handle that counts how often it was removed.
pub struct CountingHandle {
    pub removed: Arc<AtomicUsize>,
}

impl CountingHandle {
    pub fn boxed(removed: &Arc<AtomicUsize>) -> Box<dyn ListenerHandle> {
        Box::new(Self {
            removed: Arc::clone(removed),
        })
    }
}

#[async_trait]
impl ListenerHandle for CountingHandle {
    async fn remove(self: Box<Self>) -> BridgeResult<()> {
        self.removed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

mock! {
    pub Device {}

    #[async_trait]
    impl DevicePlugin for Device {
        async fn get_info(&self) -> BridgeResult<NativeDeviceInfo>;
        async fn get_battery_info(&self) -> BridgeResult<BatteryInfo>;
    }
}

mock! {
    pub Network {}

    #[async_trait]
    impl NetworkPlugin for Network {
        async fn get_status(&self) -> BridgeResult<ConnectionStatus>;
        async fn add_status_listener(
            &self,
            listener: Listener<ConnectionStatus>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
    }
}

mock! {
    pub Motion {}

    #[async_trait]
    impl MotionPlugin for Motion {
        async fn add_accel_listener(
            &self,
            listener: Listener<AccelEvent>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
    }
}

mock! {
    pub Preferences {}

    #[async_trait]
    impl PreferencesPlugin for Preferences {
        async fn get(&self, key: &str) -> BridgeResult<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> BridgeResult<()>;
        async fn remove(&self, key: &str) -> BridgeResult<()>;
    }
}

mock! {
    pub StatusBar {}

    #[async_trait]
    impl StatusBarPlugin for StatusBar {
        async fn set_style(&self, style: StatusBarStyle) -> BridgeResult<()>;
        async fn set_background_color(&self, color: &str) -> BridgeResult<()>;
    }
}

mock! {
    pub SplashScreen {}

    #[async_trait]
    impl SplashScreenPlugin for SplashScreen {
        async fn hide(&self) -> BridgeResult<()>;
    }
}

mock! {
    pub App {}

    #[async_trait]
    impl AppPlugin for App {
        async fn add_back_button_listener(
            &self,
            listener: Listener<BackButtonEvent>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
        async fn minimize_app(&self) -> BridgeResult<()>;
    }
}

mock! {
    pub LocalNotifications {}

    #[async_trait]
    impl LocalNotificationsPlugin for LocalNotifications {
        async fn create_channel(&self, channel: &NotificationChannel) -> BridgeResult<()>;
        async fn request_permissions(&self) -> BridgeResult<PermissionState>;
        async fn add_action_performed_listener(
            &self,
            listener: Listener<NotificationAction>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
    }
}

mock! {
    pub Web {}

    #[async_trait]
    impl WebPlatform for Web {
        fn navigator_platform(&self) -> String;
        fn user_agent(&self) -> String;
        fn is_online(&self) -> bool;
        fn add_connectivity_listener(
            &self,
            listener: Listener<ConnectivityEvent>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
        fn motion_support(&self) -> MotionSupport;
        async fn request_motion_permission(&self) -> BridgeResult<String>;
        fn add_device_motion_listener(
            &self,
            listener: Listener<DeviceMotion>,
        ) -> BridgeResult<Box<dyn ListenerHandle>>;
        fn history_length(&self) -> u32;
        fn history_back(&self) -> BridgeResult<()>;
        fn notifications_supported(&self) -> bool;
        async fn request_notification_permission(&self) -> BridgeResult<String>;
    }
}
