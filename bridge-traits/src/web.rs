//! Standard browser surface used by the fallback path of every capability.
//!
//! Nothing here depends on a native shell: a plain browser tab provides all
//! of it (or reports that it can't).

use crate::{
    error::Result,
    platform::{Listener, ListenerHandle, PlatformSendSync},
};

/// `online` / `offline` window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

/// How the browser exposes device-motion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSupport {
    /// No `DeviceMotionEvent` at all
    Unsupported,
    /// Events flow as soon as a listener is attached
    Implicit,
    /// `DeviceMotionEvent.requestPermission()` must be called from a user
    /// gesture first (mobile Safari 13+)
    ExplicitConsent,
}

/// Axis values as delivered by the browser; any axis may be `null`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialAcceleration {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// The part of a `devicemotion` event the capability layer reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceMotion {
    pub acceleration_including_gravity: Option<PartialAcceleration>,
}

/// Browser APIs consumed by the fallback providers.
///
/// # Platform Support
///
/// - **Web / native web view**: `navigator`, `window` events, `history`,
///   `DeviceMotionEvent`, `Notification`
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait WebPlatform: PlatformSendSync {
    /// `navigator.platform`
    fn navigator_platform(&self) -> String;

    /// `navigator.userAgent`
    fn user_agent(&self) -> String;

    /// `navigator.onLine`
    fn is_online(&self) -> bool;

    /// Listen for `online` and `offline` window events.
    fn add_connectivity_listener(
        &self,
        listener: Listener<ConnectivityEvent>,
    ) -> Result<Box<dyn ListenerHandle>>;

    fn motion_support(&self) -> MotionSupport;

    /// Run the explicit motion consent flow and return the raw answer
    /// (`"granted"`, `"denied"`, ...).
    async fn request_motion_permission(&self) -> Result<String>;

    /// Listen for `devicemotion` window events.
    fn add_device_motion_listener(
        &self,
        listener: Listener<DeviceMotion>,
    ) -> Result<Box<dyn ListenerHandle>>;

    /// `history.length`
    fn history_length(&self) -> u32;

    /// `history.back()`
    fn history_back(&self) -> Result<()>;

    /// Whether the `Notification` API exists.
    fn notifications_supported(&self) -> bool;

    /// `Notification.requestPermission()`; returns the raw answer.
    async fn request_notification_permission(&self) -> Result<String>;
}
