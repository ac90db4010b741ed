//! # Capability Configuration
//!
//! Everything the capability layer needs from its host, collected once.
//!
//! ## Required Dependencies
//!
//! - `ShellEnvironment` - native shell detection and plugin registry
//! - `WebPlatform` - browser facts and events used by every fallback path
//! - `WebStorage` - `localStorage` used by the storage fallback
//!
//! ## Optional Dependencies
//!
//! - Native plugin slots (see [`NativePlugins`]); an unset slot means the
//!   capability always takes its browser path
//! - `Clock` - defaults to [`SystemClock`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CapabilityConfig;
//! use core_runtime::plugins::PluginSlot;
//! use std::sync::Arc;
//!
//! let config = CapabilityConfig::builder()
//!     .shell_environment(Arc::new(MyShell))
//!     .web_platform(Arc::new(MyBrowser))
//!     .web_storage(Arc::new(MyStorage))
//!     .network_plugin(PluginSlot::lazy("Network", || Ok(load_network_binding())))
//!     .build()?;
//! ```
//!
//! ## Error Handling
//!
//! Missing required dependencies fail fast with
//! [`Error::CapabilityMissing`]; invalid settings fail with
//! [`Error::Config`].

use crate::error::{Error, Result};
use crate::plugins::{NativePlugins, PluginSlot};
use bridge_traits::{
    AppPlugin, Clock, DevicePlugin, LocalNotificationsPlugin, MotionPlugin, NetworkPlugin,
    NotificationChannel, NotificationVisibility, PreferencesPlugin, ShellEnvironment,
    SplashScreenPlugin, StatusBarPlugin, StatusBarStyle, SystemClock, WebPlatform, WebStorage,
};
use std::sync::Arc;

/// Default key prefix for offline cache entries.
pub const DEFAULT_OFFLINE_PREFIX: &str = "offline_";

/// Settings consumed by the one-time native shell initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSettings {
    pub status_bar_style: StatusBarStyle,
    /// `#RRGGBB` or `#AARRGGBB`; applied on Android only
    pub status_bar_color: String,
    pub notification_channel: NotificationChannel,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self {
            status_bar_style: StatusBarStyle::Dark,
            status_bar_color: "#000000".to_string(),
            notification_channel: NotificationChannel {
                id: "default".to_string(),
                name: "Default".to_string(),
                description: Some("General notifications".to_string()),
                importance: 5,
                visibility: NotificationVisibility::Public,
                vibration: true,
                sound: None,
            },
        }
    }
}

impl InitSettings {
    pub fn validate(&self) -> Result<()> {
        if self.notification_channel.id.trim().is_empty() {
            return Err(Error::Config(
                "Notification channel id must not be empty".to_string(),
            ));
        }

        if !(1..=5).contains(&self.notification_channel.importance) {
            return Err(Error::Config(format!(
                "Notification channel importance must be between 1 and 5, got {}",
                self.notification_channel.importance
            )));
        }

        if !is_hex_color(&self.status_bar_color) {
            return Err(Error::Config(format!(
                "Status bar color must be #RRGGBB or #AARRGGBB, got {:?}",
                self.status_bar_color
            )));
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Host dependencies and settings for the capability layer.
///
/// Use [`CapabilityConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CapabilityConfig {
    pub shell: Arc<dyn ShellEnvironment>,
    pub web: Arc<dyn WebPlatform>,
    pub web_storage: Arc<dyn WebStorage>,
    pub plugins: NativePlugins,
    pub clock: Arc<dyn Clock>,
    pub init: InitSettings,
    /// Prefix prepended to every offline cache key
    pub offline_prefix: String,
}

impl std::fmt::Debug for CapabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityConfig")
            .field("shell", &"ShellEnvironment { ... }")
            .field("web", &"WebPlatform { ... }")
            .field("web_storage", &"WebStorage { ... }")
            .field("plugins", &self.plugins.configured())
            .field("init", &self.init)
            .field("offline_prefix", &self.offline_prefix)
            .finish()
    }
}

impl CapabilityConfig {
    pub fn builder() -> CapabilityConfigBuilder {
        CapabilityConfigBuilder::default()
    }

    /// Validate settings. Called by [`CapabilityConfigBuilder::build`].
    pub fn validate(&self) -> Result<()> {
        self.init.validate()?;

        if self.offline_prefix.is_empty() {
            return Err(Error::Config(
                "Offline cache key prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn missing(capability: &str, message: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: message.to_string(),
    }
}

/// Builder for [`CapabilityConfig`].
#[derive(Default)]
pub struct CapabilityConfigBuilder {
    shell: Option<Arc<dyn ShellEnvironment>>,
    web: Option<Arc<dyn WebPlatform>>,
    web_storage: Option<Arc<dyn WebStorage>>,
    plugins: NativePlugins,
    clock: Option<Arc<dyn Clock>>,
    init: Option<InitSettings>,
    offline_prefix: Option<String>,
}

impl CapabilityConfigBuilder {
    /// Sets the shell environment (required).
    ///
    /// Browser-only hosts can pass `bridge_traits::BrowserOnlyEnvironment`.
    pub fn shell_environment(mut self, shell: Arc<dyn ShellEnvironment>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Sets the browser platform used by every fallback path (required).
    pub fn web_platform(mut self, web: Arc<dyn WebPlatform>) -> Self {
        self.web = Some(web);
        self
    }

    /// Sets the `localStorage` adapter (required).
    pub fn web_storage(mut self, storage: Arc<dyn WebStorage>) -> Self {
        self.web_storage = Some(storage);
        self
    }

    /// Replaces every native plugin slot at once.
    pub fn native_plugins(mut self, plugins: NativePlugins) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn app_plugin(mut self, slot: PluginSlot<dyn AppPlugin>) -> Self {
        self.plugins.app = slot;
        self
    }

    pub fn device_plugin(mut self, slot: PluginSlot<dyn DevicePlugin>) -> Self {
        self.plugins.device = slot;
        self
    }

    pub fn local_notifications_plugin(
        mut self,
        slot: PluginSlot<dyn LocalNotificationsPlugin>,
    ) -> Self {
        self.plugins.local_notifications = slot;
        self
    }

    pub fn motion_plugin(mut self, slot: PluginSlot<dyn MotionPlugin>) -> Self {
        self.plugins.motion = slot;
        self
    }

    pub fn network_plugin(mut self, slot: PluginSlot<dyn NetworkPlugin>) -> Self {
        self.plugins.network = slot;
        self
    }

    pub fn preferences_plugin(mut self, slot: PluginSlot<dyn PreferencesPlugin>) -> Self {
        self.plugins.preferences = slot;
        self
    }

    pub fn splash_screen_plugin(mut self, slot: PluginSlot<dyn SplashScreenPlugin>) -> Self {
        self.plugins.splash_screen = slot;
        self
    }

    pub fn status_bar_plugin(mut self, slot: PluginSlot<dyn StatusBarPlugin>) -> Self {
        self.plugins.status_bar = slot;
        self
    }

    /// Sets the time source. Default: [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn init_settings(mut self, settings: InitSettings) -> Self {
        self.init = Some(settings);
        self
    }

    /// Sets the offline cache key prefix. Default: `"offline_"`.
    pub fn offline_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.offline_prefix = Some(prefix.into());
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when a required dependency was not set
    /// - [`Error::Config`] when a setting fails validation
    pub fn build(self) -> Result<CapabilityConfig> {
        let shell = self.shell.ok_or_else(|| {
            missing(
                "ShellEnvironment",
                "A shell environment is required. Browser-only hosts should provide \
                 BrowserOnlyEnvironment; native shells should provide their bridge adapter.",
            )
        })?;

        let web = self.web.ok_or_else(|| {
            missing(
                "WebPlatform",
                "A web platform is required for browser fallbacks. \
                 Web: use bridge_wasm's WebPlatform adapter.",
            )
        })?;

        let web_storage = self.web_storage.ok_or_else(|| {
            missing(
                "WebStorage",
                "A WebStorage implementation is required for the storage fallback. \
                 Web: use bridge_wasm's localStorage adapter; tests can use MemoryWebStorage.",
            )
        })?;

        let config = CapabilityConfig {
            shell,
            web,
            web_storage,
            plugins: self.plugins,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            init: self.init.unwrap_or_default(),
            offline_prefix: self
                .offline_prefix
                .unwrap_or_else(|| DEFAULT_OFFLINE_PREFIX.to_string()),
        };

        config.validate()?;

        tracing::debug!(
            native_plugins = ?config.plugins.configured(),
            offline_prefix = %config.offline_prefix,
            "Capability configuration built"
        );

        Ok(config)
    }
}
