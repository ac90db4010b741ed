//! Lazily-loaded native plugin bindings.
//!
//! A [`PluginSlot`] holds a factory for one native plugin binding. The factory
//! runs the first time a capability actually selects the native provider, so
//! browser-only sessions never pay for loading shell bindings. The loaded
//! binding is cached and shared by every clone of the slot.

use std::fmt;
use std::sync::{Arc, OnceLock};

use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    AppPlugin, DevicePlugin, LocalNotificationsPlugin, MotionPlugin, NetworkPlugin,
    PreferencesPlugin, SplashScreenPlugin, StatusBarPlugin,
};

#[cfg(not(target_arch = "wasm32"))]
type Factory<P> = Box<dyn Fn() -> BridgeResult<Arc<P>> + Send + Sync>;

#[cfg(target_arch = "wasm32")]
type Factory<P> = Box<dyn Fn() -> BridgeResult<Arc<P>>>;

struct SlotInner<P: ?Sized> {
    name: &'static str,
    factory: Option<Factory<P>>,
    loaded: OnceLock<Arc<P>>,
}

/// Lazily-initialized handle to one native plugin binding.
pub struct PluginSlot<P: ?Sized> {
    inner: Arc<SlotInner<P>>,
}

impl<P: ?Sized> Clone for PluginSlot<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: ?Sized> fmt::Debug for PluginSlot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSlot")
            .field("name", &self.inner.name)
            .field("configured", &self.is_configured())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl<P: ?Sized> PluginSlot<P> {
    /// Slot with no binding; the capability always uses its browser provider.
    pub fn empty(name: &'static str) -> Self {
        Self {
            inner: Arc::new(SlotInner {
                name,
                factory: None,
                loaded: OnceLock::new(),
            }),
        }
    }

    /// Slot that runs `factory` on first use.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn lazy<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> BridgeResult<Arc<P>> + Send + Sync + 'static,
    {
        Self::from_factory(name, Box::new(factory))
    }

    /// Slot that runs `factory` on first use.
    #[cfg(target_arch = "wasm32")]
    pub fn lazy<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> BridgeResult<Arc<P>> + 'static,
    {
        Self::from_factory(name, Box::new(factory))
    }

    fn from_factory(name: &'static str, factory: Factory<P>) -> Self {
        Self {
            inner: Arc::new(SlotInner {
                name,
                factory: Some(factory),
                loaded: OnceLock::new(),
            }),
        }
    }

    /// Slot pre-filled with an existing binding.
    pub fn ready(name: &'static str, plugin: Arc<P>) -> Self {
        let loaded = OnceLock::new();
        let _ = loaded.set(plugin);
        Self {
            inner: Arc::new(SlotInner {
                name,
                factory: None,
                loaded,
            }),
        }
    }

    /// Plugin name as registered with the shell.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Whether a binding can be produced at all.
    pub fn is_configured(&self) -> bool {
        self.inner.factory.is_some() || self.inner.loaded.get().is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.get().is_some()
    }

    /// Return the binding, running the factory on first call.
    ///
    /// A failing factory is retried on the next call.
    pub fn load(&self) -> BridgeResult<Arc<P>> {
        if let Some(plugin) = self.inner.loaded.get() {
            return Ok(Arc::clone(plugin));
        }

        let factory = self.inner.factory.as_ref().ok_or_else(|| {
            BridgeError::NotAvailable(format!("{} plugin binding not configured", self.inner.name))
        })?;

        tracing::debug!(plugin = self.inner.name, "Loading native plugin binding");
        let plugin = factory()?;

        // A concurrent loader may have won; keep whichever landed first.
        let _ = self.inner.loaded.set(Arc::clone(&plugin));
        Ok(self
            .inner
            .loaded
            .get()
            .map(Arc::clone)
            .unwrap_or(plugin))
    }
}

/// Slots for every native plugin the capability layer uses.
#[derive(Clone, Debug)]
pub struct NativePlugins {
    pub app: PluginSlot<dyn AppPlugin>,
    pub device: PluginSlot<dyn DevicePlugin>,
    pub local_notifications: PluginSlot<dyn LocalNotificationsPlugin>,
    pub motion: PluginSlot<dyn MotionPlugin>,
    pub network: PluginSlot<dyn NetworkPlugin>,
    pub preferences: PluginSlot<dyn PreferencesPlugin>,
    pub splash_screen: PluginSlot<dyn SplashScreenPlugin>,
    pub status_bar: PluginSlot<dyn StatusBarPlugin>,
}

impl Default for NativePlugins {
    fn default() -> Self {
        use bridge_traits::plugins;

        Self {
            app: PluginSlot::empty(plugins::APP),
            device: PluginSlot::empty(plugins::DEVICE),
            local_notifications: PluginSlot::empty(plugins::LOCAL_NOTIFICATIONS),
            motion: PluginSlot::empty(plugins::MOTION),
            network: PluginSlot::empty(plugins::NETWORK),
            preferences: PluginSlot::empty(plugins::PREFERENCES),
            splash_screen: PluginSlot::empty(plugins::SPLASH_SCREEN),
            status_bar: PluginSlot::empty(plugins::STATUS_BAR),
        }
    }
}

impl NativePlugins {
    /// Names of the slots that can produce a binding.
    pub fn configured(&self) -> Vec<&'static str> {
        [
            (self.app.name(), self.app.is_configured()),
            (self.device.name(), self.device.is_configured()),
            (
                self.local_notifications.name(),
                self.local_notifications.is_configured(),
            ),
            (self.motion.name(), self.motion.is_configured()),
            (self.network.name(), self.network.is_configured()),
            (self.preferences.name(), self.preferences.is_configured()),
            (self.splash_screen.name(), self.splash_screen.is_configured()),
            (self.status_bar.name(), self.status_bar.is_configured()),
        ]
        .into_iter()
        .filter_map(|(name, configured)| configured.then_some(name))
        .collect()
    }
}
