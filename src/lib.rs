//! Workspace façade crate.
//!
//! Host applications depend on this crate alone and get the capability API,
//! its configuration types and the bridge contracts. WebAssembly builds enable
//! the `wasm` feature to pull in the browser / native-shell bridges from
//! `bridge-wasm`.

pub use bridge_traits;
pub use core_capabilities;
pub use core_runtime;

pub use core_capabilities::{
    CacheEnvelope, Capabilities, CapabilityError, DeviceInfo, InitReport, InitState, InitStep,
    MotionSample, NetworkStatus, PlatformFact, PlatformId, Result,
};
pub use core_runtime::{CapabilityConfig, InitSettings, NativePlugins, PluginSlot};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm::{build_wasm_config, WasmBridgeConfig};
