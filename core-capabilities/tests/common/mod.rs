//! Fake host environment for the integration tests.
//!
//! Every native plugin records its calls in a shared [`CallLog`], so tests can
//! assert that the browser path never touches the bridge.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult, plugins, AccelEvent, AppPlugin, BackButtonEvent, BatteryInfo,
    ConnectionStatus, ConnectivityEvent, DeviceMotion, DevicePlugin, Listener, ListenerHandle,
    LocalNotificationsPlugin, ManualClock, MemoryWebStorage, MotionPlugin, MotionSupport,
    NativeDeviceInfo, NetworkPlugin, NotificationAction, NotificationChannel, PermissionState,
    PreferencesPlugin, ShellEnvironment, SplashScreenPlugin, StatusBarPlugin, StatusBarStyle,
    WebPlatform,
};
use core_capabilities::{Capabilities, InitGuard};
use core_runtime::{CapabilityConfig, InitSettings, NativePlugins, PluginSlot};
use parking_lot::Mutex;

pub const SAFARI_IPHONE: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.lock().iter().filter(|c| *c == call).count()
    }
}

/// Listeners registered with a fake event source.
pub struct ListenerSet<T> {
    listeners: Arc<Mutex<Vec<Option<Listener<T>>>>>,
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone + 'static> ListenerSet<T> {
    pub fn add(&self, listener: Listener<T>) -> Box<dyn ListenerHandle> {
        let mut listeners = self.listeners.lock();
        listeners.push(Some(listener));
        Box::new(SetHandle {
            listeners: Arc::clone(&self.listeners),
            index: listeners.len() - 1,
        })
    }

    pub fn emit(&self, event: T) {
        let active: Vec<Listener<T>> = self.listeners.lock().iter().flatten().cloned().collect();
        for listener in active {
            listener(event.clone());
        }
    }

    pub fn active(&self) -> usize {
        self.listeners.lock().iter().flatten().count()
    }
}

struct SetHandle<T> {
    listeners: Arc<Mutex<Vec<Option<Listener<T>>>>>,
    index: usize,
}

#[async_trait]
impl<T: 'static> ListenerHandle for SetHandle<T> {
    async fn remove(self: Box<Self>) -> BridgeResult<()> {
        self.listeners.lock()[self.index] = None;
        Ok(())
    }
}

pub struct FakeShell {
    pub native: AtomicBool,
    pub platform: &'static str,
    pub plugins: Vec<&'static str>,
}

impl ShellEnvironment for FakeShell {
    fn is_native_platform(&self) -> bool {
        self.native.load(Ordering::SeqCst)
    }

    fn platform(&self) -> String {
        self.platform.to_string()
    }

    fn is_plugin_available(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| *plugin == name)
    }
}

pub struct FakeBrowser {
    pub online: AtomicBool,
    pub user_agent: String,
    pub motion_support: MotionSupport,
    pub motion_answer: &'static str,
    pub connectivity: ListenerSet<ConnectivityEvent>,
    pub motion: ListenerSet<DeviceMotion>,
    pub history_backs: AtomicUsize,
}

impl FakeBrowser {
    pub fn new(user_agent: &str) -> Self {
        Self {
            online: AtomicBool::new(true),
            user_agent: user_agent.to_string(),
            motion_support: MotionSupport::Implicit,
            motion_answer: "granted",
            connectivity: ListenerSet::default(),
            motion: ListenerSet::default(),
            history_backs: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WebPlatform for FakeBrowser {
    fn navigator_platform(&self) -> String {
        "iPhone".to_string()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn add_connectivity_listener(
        &self,
        listener: Listener<ConnectivityEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self.connectivity.add(listener))
    }

    fn motion_support(&self) -> MotionSupport {
        self.motion_support
    }

    async fn request_motion_permission(&self) -> BridgeResult<String> {
        Ok(self.motion_answer.to_string())
    }

    fn add_device_motion_listener(
        &self,
        listener: Listener<DeviceMotion>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        Ok(self.motion.add(listener))
    }

    fn history_length(&self) -> u32 {
        1
    }

    fn history_back(&self) -> BridgeResult<()> {
        self.history_backs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn notifications_supported(&self) -> bool {
        true
    }

    async fn request_notification_permission(&self) -> BridgeResult<String> {
        Ok("default".to_string())
    }
}

pub struct FakeDevice {
    pub calls: Arc<CallLog>,
}

#[async_trait]
impl DevicePlugin for FakeDevice {
    async fn get_info(&self) -> BridgeResult<NativeDeviceInfo> {
        self.calls.record("Device.getInfo");
        Ok(NativeDeviceInfo {
            model: "iPhone15,2".to_string(),
            platform: "ios".to_string(),
            operating_system: "ios".to_string(),
            os_version: "17.0".to_string(),
            manufacturer: "Apple".to_string(),
            is_virtual: false,
        })
    }

    async fn get_battery_info(&self) -> BridgeResult<BatteryInfo> {
        self.calls.record("Device.getBatteryInfo");
        Ok(BatteryInfo {
            battery_level: Some(0.8),
            is_charging: Some(true),
        })
    }
}

pub struct FakeNetwork {
    pub calls: Arc<CallLog>,
    pub listeners: ListenerSet<ConnectionStatus>,
}

#[async_trait]
impl NetworkPlugin for FakeNetwork {
    async fn get_status(&self) -> BridgeResult<ConnectionStatus> {
        self.calls.record("Network.getStatus");
        Ok(ConnectionStatus {
            connected: true,
            connection_type: "wifi".to_string(),
        })
    }

    async fn add_status_listener(
        &self,
        listener: Listener<ConnectionStatus>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        self.calls.record("Network.addListener");
        Ok(self.listeners.add(listener))
    }
}

pub struct FakeMotion {
    pub calls: Arc<CallLog>,
    pub listeners: ListenerSet<AccelEvent>,
}

#[async_trait]
impl MotionPlugin for FakeMotion {
    async fn add_accel_listener(
        &self,
        listener: Listener<AccelEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        self.calls.record("Motion.addListener");
        Ok(self.listeners.add(listener))
    }
}

pub struct FakePreferences {
    pub calls: Arc<CallLog>,
    pub values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PreferencesPlugin for FakePreferences {
    async fn get(&self, key: &str) -> BridgeResult<Option<String>> {
        self.calls.record("Preferences.get");
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.calls.record("Preferences.set");
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> BridgeResult<()> {
        self.calls.record("Preferences.remove");
        self.values.lock().remove(key);
        Ok(())
    }
}

pub struct FakeStatusBar {
    pub calls: Arc<CallLog>,
}

#[async_trait]
impl StatusBarPlugin for FakeStatusBar {
    async fn set_style(&self, style: StatusBarStyle) -> BridgeResult<()> {
        self.calls.record(format!("StatusBar.setStyle:{style:?}"));
        Ok(())
    }

    async fn set_background_color(&self, color: &str) -> BridgeResult<()> {
        self.calls.record(format!("StatusBar.setBackgroundColor:{color}"));
        Ok(())
    }
}

pub struct FakeSplashScreen {
    pub calls: Arc<CallLog>,
}

#[async_trait]
impl SplashScreenPlugin for FakeSplashScreen {
    async fn hide(&self) -> BridgeResult<()> {
        self.calls.record("SplashScreen.hide");
        Ok(())
    }
}

pub struct FakeApp {
    pub calls: Arc<CallLog>,
    pub listeners: ListenerSet<BackButtonEvent>,
}

#[async_trait]
impl AppPlugin for FakeApp {
    async fn add_back_button_listener(
        &self,
        listener: Listener<BackButtonEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        self.calls.record("App.addListener");
        Ok(self.listeners.add(listener))
    }

    async fn minimize_app(&self) -> BridgeResult<()> {
        self.calls.record("App.minimizeApp");
        Ok(())
    }
}

pub struct FakeNotifications {
    pub calls: Arc<CallLog>,
    pub channels: Mutex<Vec<NotificationChannel>>,
    pub listeners: ListenerSet<NotificationAction>,
}

#[async_trait]
impl LocalNotificationsPlugin for FakeNotifications {
    async fn create_channel(&self, channel: &NotificationChannel) -> BridgeResult<()> {
        self.calls.record("LocalNotifications.createChannel");
        self.channels.lock().push(channel.clone());
        Ok(())
    }

    async fn request_permissions(&self) -> BridgeResult<PermissionState> {
        self.calls.record("LocalNotifications.requestPermissions");
        Ok(PermissionState::Granted)
    }

    async fn add_action_performed_listener(
        &self,
        listener: Listener<NotificationAction>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        self.calls.record("LocalNotifications.addListener");
        Ok(self.listeners.add(listener))
    }
}

/// A complete host: shell, browser and one fake per native plugin.
pub struct Harness {
    pub calls: Arc<CallLog>,
    pub shell: Arc<FakeShell>,
    pub browser: Arc<FakeBrowser>,
    pub storage: Arc<MemoryWebStorage>,
    pub clock: Arc<ManualClock>,
    pub device: Arc<FakeDevice>,
    pub network: Arc<FakeNetwork>,
    pub motion: Arc<FakeMotion>,
    pub preferences: Arc<FakePreferences>,
    pub status_bar: Arc<FakeStatusBar>,
    pub splash_screen: Arc<FakeSplashScreen>,
    pub app: Arc<FakeApp>,
    pub notifications: Arc<FakeNotifications>,
}

impl Harness {
    /// Plain browser tab. Plugin bindings exist but the shell is absent.
    pub fn browser(browser: FakeBrowser) -> Self {
        Self::build(false, "web", &[], browser)
    }

    /// Native shell with every plugin registered.
    pub fn native(platform: &'static str) -> Self {
        Self::native_with(platform, &plugins::ALL)
    }

    pub fn native_with(platform: &'static str, registered: &[&'static str]) -> Self {
        Self::build(true, platform, registered, FakeBrowser::new(SAFARI_IPHONE))
    }

    fn build(
        native: bool,
        platform: &'static str,
        registered: &[&'static str],
        browser: FakeBrowser,
    ) -> Self {
        let calls = Arc::new(CallLog::default());
        Self {
            shell: Arc::new(FakeShell {
                native: AtomicBool::new(native),
                platform,
                plugins: registered.to_vec(),
            }),
            browser: Arc::new(browser),
            storage: Arc::new(MemoryWebStorage::new()),
            clock: Arc::new(ManualClock::new(1_700_000_000_000)),
            device: Arc::new(FakeDevice {
                calls: Arc::clone(&calls),
            }),
            network: Arc::new(FakeNetwork {
                calls: Arc::clone(&calls),
                listeners: ListenerSet::default(),
            }),
            motion: Arc::new(FakeMotion {
                calls: Arc::clone(&calls),
                listeners: ListenerSet::default(),
            }),
            preferences: Arc::new(FakePreferences {
                calls: Arc::clone(&calls),
                values: Mutex::new(HashMap::new()),
            }),
            status_bar: Arc::new(FakeStatusBar {
                calls: Arc::clone(&calls),
            }),
            splash_screen: Arc::new(FakeSplashScreen {
                calls: Arc::clone(&calls),
            }),
            app: Arc::new(FakeApp {
                calls: Arc::clone(&calls),
                listeners: ListenerSet::default(),
            }),
            notifications: Arc::new(FakeNotifications {
                calls: Arc::clone(&calls),
                channels: Mutex::new(Vec::new()),
                listeners: ListenerSet::default(),
            }),
            calls,
        }
    }

    pub fn plugins(&self) -> NativePlugins {
        NativePlugins {
            app: PluginSlot::ready(plugins::APP, Arc::clone(&self.app) as Arc<dyn AppPlugin>),
            device: PluginSlot::ready(
                plugins::DEVICE,
                Arc::clone(&self.device) as Arc<dyn DevicePlugin>,
            ),
            local_notifications: PluginSlot::ready(
                plugins::LOCAL_NOTIFICATIONS,
                Arc::clone(&self.notifications) as Arc<dyn LocalNotificationsPlugin>,
            ),
            motion: PluginSlot::ready(
                plugins::MOTION,
                Arc::clone(&self.motion) as Arc<dyn MotionPlugin>,
            ),
            network: PluginSlot::ready(
                plugins::NETWORK,
                Arc::clone(&self.network) as Arc<dyn NetworkPlugin>,
            ),
            preferences: PluginSlot::ready(
                plugins::PREFERENCES,
                Arc::clone(&self.preferences) as Arc<dyn PreferencesPlugin>,
            ),
            splash_screen: PluginSlot::ready(
                plugins::SPLASH_SCREEN,
                Arc::clone(&self.splash_screen) as Arc<dyn SplashScreenPlugin>,
            ),
            status_bar: PluginSlot::ready(
                plugins::STATUS_BAR,
                Arc::clone(&self.status_bar) as Arc<dyn StatusBarPlugin>,
            ),
        }
    }

    pub fn config(&self) -> CapabilityConfig {
        CapabilityConfig::builder()
            .shell_environment(Arc::clone(&self.shell) as Arc<dyn ShellEnvironment>)
            .web_platform(Arc::clone(&self.browser) as Arc<dyn WebPlatform>)
            .web_storage(Arc::clone(&self.storage) as Arc<dyn bridge_traits::WebStorage>)
            .native_plugins(self.plugins())
            .clock(Arc::clone(&self.clock) as Arc<dyn bridge_traits::Clock>)
            .init_settings(InitSettings::default())
            .build()
            .expect("valid test config")
    }

    /// Capabilities with a guard private to this test.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::with_guard(self.config(), Arc::new(InitGuard::new()))
    }
}

/// Let detached tasks spawned by listeners run.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
