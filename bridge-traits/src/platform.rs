//! Environment introspection and the listener plumbing shared by every
//! plugin trait.
//!
//! Native targets require `Send + Sync` so bridge implementations can be
//! shared across async tasks. WebAssembly builds run on a single thread and
//! hold `web_sys`/`js_sys` objects that cannot satisfy those bounds, so the
//! marker traits below become no-ops on `wasm32`.

use std::sync::Arc;

use crate::error::Result;

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Marker trait equivalent to `Send` on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSend for T where T: Send {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSend {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSend for T {}

/// Callback invoked for every event a bridge delivers.
#[cfg(not(target_arch = "wasm32"))]
pub type Listener<T> = Arc<dyn Fn(T) + Send + Sync>;

#[cfg(target_arch = "wasm32")]
pub type Listener<T> = Arc<dyn Fn(T)>;

/// Well-known plugin names registered by the native shell.
pub mod plugins {
    pub const APP: &str = "App";
    pub const DEVICE: &str = "Device";
    pub const LOCAL_NOTIFICATIONS: &str = "LocalNotifications";
    pub const MOTION: &str = "Motion";
    pub const NETWORK: &str = "Network";
    pub const PREFERENCES: &str = "Preferences";
    pub const SPLASH_SCREEN: &str = "SplashScreen";
    pub const STATUS_BAR: &str = "StatusBar";

    /// Every plugin the capability layer knows how to use.
    pub const ALL: [&str; 8] = [
        APP,
        DEVICE,
        LOCAL_NOTIFICATIONS,
        MOTION,
        NETWORK,
        PREFERENCES,
        SPLASH_SCREEN,
        STATUS_BAR,
    ];
}

/// Live view of the hosting environment.
///
/// Implementations must answer from the current environment on every call;
/// a shell can be torn down and rebuilt underneath a long-lived process
/// (hybrid test harnesses do exactly that).
///
/// # Platform Support
///
/// - **Native shell**: answers come from the plugin bridge runtime
/// - **Plain browser**: `false`, `"web"`, and no plugins
pub trait ShellEnvironment: PlatformSendSync {
    /// Whether the process runs inside a native application shell.
    fn is_native_platform(&self) -> bool;

    /// Raw platform identifier reported by the shell (`"ios"`, `"android"`, `"web"`).
    fn platform(&self) -> String;

    /// Whether the named plugin is registered with the bridge.
    fn is_plugin_available(&self, name: &str) -> bool;
}

/// Registration returned by every `add_*_listener` call.
///
/// Dropping a handle does not unsubscribe; call [`ListenerHandle::remove`].
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait ListenerHandle: PlatformSend {
    /// Detach the listener from its event source.
    async fn remove(self: Box<Self>) -> Result<()>;
}

/// Environment that never reports a native shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOnlyEnvironment;

impl ShellEnvironment for BrowserOnlyEnvironment {
    fn is_native_platform(&self) -> bool {
        false
    }

    fn platform(&self) -> String {
        "web".to_string()
    }

    fn is_plugin_available(&self, _name: &str) -> bool {
        false
    }
}
