//! Convenience helpers for wiring all wasm bridge implementations together.
//!
//! Hosts call [`build_wasm_bridges`] once at startup and hand the result to
//! `core-runtime`'s config builder, or use [`build_wasm_config`] to do both in
//! one step. Native plugin bindings are resolved lazily: nothing touches
//! `Capacitor.Plugins` until a capability actually takes its native path.

use std::sync::Arc;

use bridge_traits::{
    error::Result as BridgeResult, plugins, AppPlugin, DevicePlugin, LocalNotificationsPlugin,
    MotionPlugin, NetworkPlugin, PreferencesPlugin, ShellEnvironment, SplashScreenPlugin,
    StatusBarPlugin, WebPlatform, WebStorage,
};
use core_runtime::{
    CapabilityConfig, CapabilityConfigBuilder, Error, InitSettings, NativePlugins, PluginSlot,
};
use tracing::debug;

use crate::capacitor::CapacitorShell;
use crate::plugins::{
    CapacitorApp, CapacitorDevice, CapacitorLocalNotifications, CapacitorMotion,
    CapacitorNetwork, CapacitorPreferences, CapacitorSplashScreen, CapacitorStatusBar,
};
use crate::storage::LocalStorage;
use crate::web::BrowserPlatform;

/// Configuration for [`build_wasm_config`].
#[derive(Debug, Clone, Default)]
pub struct WasmBridgeConfig {
    /// Settings for the one-time shell initialization.
    pub init: InitSettings,
    /// Offline cache key prefix; `None` keeps the default.
    pub offline_prefix: Option<String>,
}

impl WasmBridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_init_settings(mut self, init: InitSettings) -> Self {
        self.init = init;
        self
    }

    pub fn with_offline_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.offline_prefix = Some(prefix.into());
        self
    }
}

/// Fully constructed wasm bridge objects ready for injection.
pub struct WasmBridgeSet {
    /// `Capacitor` global, re-read on every query.
    pub shell: Arc<dyn ShellEnvironment>,
    /// Standard browser APIs.
    pub web: Arc<dyn WebPlatform>,
    /// `window.localStorage`.
    pub web_storage: Arc<dyn WebStorage>,
    /// Lazily resolved `Capacitor.Plugins` bindings.
    pub plugins: NativePlugins,
}

impl WasmBridgeSet {
    /// Config builder pre-filled with every bridge in this set.
    pub fn config_builder(&self) -> CapabilityConfigBuilder {
        CapabilityConfig::builder()
            .shell_environment(Arc::clone(&self.shell))
            .web_platform(Arc::clone(&self.web))
            .web_storage(Arc::clone(&self.web_storage))
            .native_plugins(self.plugins.clone())
    }
}

/// Slots resolving each binding on first native use.
pub fn capacitor_plugins() -> NativePlugins {
    NativePlugins {
        app: PluginSlot::lazy(plugins::APP, || {
            Ok(Arc::new(CapacitorApp::resolve()?) as Arc<dyn AppPlugin>)
        }),
        device: PluginSlot::lazy(plugins::DEVICE, || {
            Ok(Arc::new(CapacitorDevice::resolve()?) as Arc<dyn DevicePlugin>)
        }),
        local_notifications: PluginSlot::lazy(plugins::LOCAL_NOTIFICATIONS, || {
            Ok(Arc::new(CapacitorLocalNotifications::resolve()?)
                as Arc<dyn LocalNotificationsPlugin>)
        }),
        motion: PluginSlot::lazy(plugins::MOTION, || {
            Ok(Arc::new(CapacitorMotion::resolve()?) as Arc<dyn MotionPlugin>)
        }),
        network: PluginSlot::lazy(plugins::NETWORK, || {
            Ok(Arc::new(CapacitorNetwork::resolve()?) as Arc<dyn NetworkPlugin>)
        }),
        preferences: PluginSlot::lazy(plugins::PREFERENCES, || {
            Ok(Arc::new(CapacitorPreferences::resolve()?) as Arc<dyn PreferencesPlugin>)
        }),
        splash_screen: PluginSlot::lazy(plugins::SPLASH_SCREEN, || {
            Ok(Arc::new(CapacitorSplashScreen::resolve()?) as Arc<dyn SplashScreenPlugin>)
        }),
        status_bar: PluginSlot::lazy(plugins::STATUS_BAR, || {
            Ok(Arc::new(CapacitorStatusBar::resolve()?) as Arc<dyn StatusBarPlugin>)
        }),
    }
}

/// Build the default wasm bridge stack.
///
/// # Errors
///
/// Fails when `localStorage` is unavailable.
pub fn build_wasm_bridges() -> BridgeResult<WasmBridgeSet> {
    let set = WasmBridgeSet {
        shell: Arc::new(CapacitorShell::new()),
        web: Arc::new(BrowserPlatform::new()),
        web_storage: Arc::new(LocalStorage::new()?),
        plugins: capacitor_plugins(),
    };
    debug!(native = set.shell.is_native_platform(), "Wasm bridges built");
    Ok(set)
}

/// Build a validated [`CapabilityConfig`] for the browser / web view host.
pub fn build_wasm_config(config: WasmBridgeConfig) -> core_runtime::Result<CapabilityConfig> {
    let bridges = build_wasm_bridges().map_err(|err| Error::CapabilityMissing {
        capability: "WebStorage".to_string(),
        message: err.to_string(),
    })?;

    let mut builder = bridges.config_builder().init_settings(config.init);
    if let Some(prefix) = config.offline_prefix {
        builder = builder.offline_prefix(prefix);
    }
    builder.build()
}
