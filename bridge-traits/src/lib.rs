//! # Host Bridge Traits
//!
//! Contract between the capability layer and whatever hosts it.
//!
//! ## Overview
//!
//! Application code may run inside a native application shell that exposes a
//! plugin bridge, or inside a plain browser. This crate describes both
//! surfaces as traits so the capability layer can pick a provider per call
//! and be tested without either environment present.
//!
//! ## Traits
//!
//! ### Environment
//! - [`ShellEnvironment`](platform::ShellEnvironment) - Native shell detection and plugin registry
//! - [`ListenerHandle`](platform::ListenerHandle) - Removable event subscription
//!
//! ### Native plugins
//! - [`DevicePlugin`](device::DevicePlugin) - Identity and battery
//! - [`NetworkPlugin`](network::NetworkPlugin) - Connectivity status and changes
//! - [`MotionPlugin`](motion::MotionPlugin) - Accelerometer events
//! - [`PreferencesPlugin`](storage::PreferencesPlugin) - Key-value preferences
//! - [`StatusBarPlugin`](shell::StatusBarPlugin), [`SplashScreenPlugin`](shell::SplashScreenPlugin),
//!   [`AppPlugin`](shell::AppPlugin) - Shell chrome and back button
//! - [`LocalNotificationsPlugin`](notifications::LocalNotificationsPlugin) - Channels, permission, activations
//!
//! ### Browser
//! - [`WebPlatform`](web::WebPlatform) - Navigator facts, window events, history
//! - [`WebStorage`](storage::WebStorage) - `localStorage`
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). An absent
//! plugin is not an error at this level: callers check
//! [`ShellEnvironment::is_plugin_available`](platform::ShellEnvironment::is_plugin_available)
//! first. Errors describe transport failures (a bridge call rejected) and
//! malformed payloads.
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` on native targets through
//! [`PlatformSendSync`](platform::PlatformSendSync); on `wasm32` the bound
//! disappears because browser objects are single-threaded.

pub mod device;
pub mod error;
pub mod motion;
pub mod network;
pub mod notifications;
pub mod permissions;
pub mod platform;
pub mod shell;
pub mod storage;
pub mod time;
pub mod web;

pub use error::BridgeError;

// Re-export commonly used types
pub use device::{BatteryInfo, DevicePlugin, NativeDeviceInfo};
pub use motion::{AccelEvent, Acceleration, MotionPlugin};
pub use network::{ConnectionStatus, NetworkPlugin};
pub use notifications::{
    LocalNotificationsPlugin, NotificationAction, NotificationChannel, NotificationVisibility,
};
pub use permissions::PermissionState;
pub use platform::{
    plugins, BrowserOnlyEnvironment, Listener, ListenerHandle, PlatformSend, PlatformSendSync,
    ShellEnvironment,
};
pub use shell::{AppPlugin, BackButtonEvent, SplashScreenPlugin, StatusBarPlugin, StatusBarStyle};
pub use storage::{MemoryWebStorage, PreferencesPlugin, WebStorage};
pub use time::{Clock, LogEntry, LogLevel, LoggerSink, ManualClock, SystemClock};
pub use web::{ConnectivityEvent, DeviceMotion, MotionSupport, PartialAcceleration, WebPlatform};
