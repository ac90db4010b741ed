#![cfg(target_arch = "wasm32")]
//! Browser integration tests for the wasm bridges.
//!
//! These run in a plain browser page, so no `Capacitor` global exists unless
//! a test installs one.

use bridge_traits::{BridgeError, ShellEnvironment, WebPlatform, WebStorage};
use bridge_wasm::{
    build_wasm_bridges, build_wasm_config, BrowserPlatform, CapacitorDevice, CapacitorShell,
    LocalStorage, WasmBridgeConfig, WasmError,
};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let storage = LocalStorage::new().unwrap();
    storage.set_item("bridge-wasm-test", "one").unwrap();
    storage.set_item("bridge-wasm-test", "two").unwrap();
    assert_eq!(
        storage.get_item("bridge-wasm-test").unwrap().as_deref(),
        Some("two")
    );

    storage.remove_item("bridge-wasm-test").unwrap();
    assert_eq!(storage.get_item("bridge-wasm-test").unwrap(), None);
    storage.remove_item("bridge-wasm-test").unwrap();
}

#[wasm_bindgen_test]
fn test_shell_absent_in_plain_browser() {
    let shell = CapacitorShell::new();
    assert!(!shell.is_native_platform());
    assert_eq!(shell.platform(), "web");
    assert!(!shell.is_plugin_available("Device"));

    assert!(matches!(
        CapacitorDevice::resolve(),
        Err(WasmError::NotAvailable(_))
    ));
}

#[wasm_bindgen_test]
fn test_shell_injected_later_is_seen() {
    let global = js_sys::global();
    let runtime = js_sys::Function::new_no_args("return true;");
    let capacitor = js_sys::Object::new();
    Reflect::set(&capacitor, &"isNativePlatform".into(), &runtime).unwrap();
    Reflect::set(
        &capacitor,
        &"getPlatform".into(),
        &js_sys::Function::new_no_args("return 'android';"),
    )
    .unwrap();
    Reflect::set(&global, &"Capacitor".into(), &capacitor).unwrap();

    let shell = CapacitorShell::new();
    assert!(shell.is_native_platform());
    assert_eq!(shell.platform(), "android");
    // No isPluginAvailable on the fake runtime.
    assert!(!shell.is_plugin_available("Device"));

    Reflect::set(&global, &"Capacitor".into(), &JsValue::UNDEFINED).unwrap();
    assert!(!shell.is_native_platform());
}

#[wasm_bindgen_test]
fn test_browser_platform_reports_navigator() {
    let web = BrowserPlatform::new();
    assert!(!web.user_agent().is_empty());
    assert!(web.history_length() >= 1);
}

#[wasm_bindgen_test]
fn test_unbound_native_slot_reports_not_available() {
    let bridges = build_wasm_bridges().unwrap();
    assert!(bridges.plugins.device.is_configured());
    assert!(matches!(
        bridges.plugins.device.load(),
        Err(BridgeError::NotAvailable(_))
    ));
}

#[wasm_bindgen_test]
fn test_build_config_applies_prefix() {
    let config = build_wasm_config(WasmBridgeConfig::new().with_offline_prefix("cache_")).unwrap();
    assert_eq!(config.offline_prefix, "cache_");
    assert_eq!(config.plugins.configured().len(), 8);
}
