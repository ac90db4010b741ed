//! WebAssembly Bridge Implementations
//!
//! Implementations of the `bridge-traits` contracts for code compiled to
//! WebAssembly and loaded either in a plain browser tab or in a native
//! application shell's web view.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - [`CapacitorShell`]: shell detection through the `Capacitor` global
//! - `Capacitor*` plugin bindings: `Capacitor.Plugins.<Name>` calls and events
//! - [`BrowserPlatform`]: navigator, window events, history, `Notification`
//! - [`LocalStorage`]: `window.localStorage`
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::{build_wasm_config, WasmBridgeConfig};
//! use core_capabilities::Capabilities;
//!
//! let config = build_wasm_config(WasmBridgeConfig::new())?;
//! let capabilities = Capabilities::new(config);
//! wasm_bindgen_futures::spawn_local(async move {
//!     capabilities.initialize().await;
//! });
//! ```

#![cfg(target_arch = "wasm32")]

pub mod bootstrap;
pub mod capacitor;
pub mod error;
pub mod plugins;
pub mod storage;
pub mod wasm;
pub mod web;

// Re-export commonly used types
pub use bootstrap::{
    build_wasm_bridges, build_wasm_config, capacitor_plugins, WasmBridgeConfig, WasmBridgeSet,
};
pub use capacitor::{CapacitorPlugin, CapacitorShell};
pub use error::{WasmError, WasmResult};
pub use plugins::{
    CapacitorApp, CapacitorDevice, CapacitorLocalNotifications, CapacitorMotion,
    CapacitorNetwork, CapacitorPreferences, CapacitorSplashScreen, CapacitorStatusBar,
};
pub use storage::LocalStorage;
pub use web::BrowserPlatform;
