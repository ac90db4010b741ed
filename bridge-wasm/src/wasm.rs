//! JavaScript-facing startup hooks.
//!
//! ```javascript
//! import init, { installPanicHook, initLogging, shellSummary } from "./pkg/bridge_wasm.js";
//!
//! await init();
//! installPanicHook();
//! initLogging("debug");
//! console.log(shellSummary()); // { native: true, platform: "android" }
//! ```

use bridge_traits::{LogLevel, ShellEnvironment};
use core_runtime::logging::{init_logging, LoggingConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::capacitor::CapacitorShell;

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_level(level: &str) -> LogLevel {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

/// Route Rust panics to `console.error`.
#[wasm_bindgen(js_name = installPanicHook)]
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Install console logging for the capability crates.
///
/// Unknown levels fall back to `info`. Fails if logging is already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_console_logging(level: &str) -> Result<(), JsValue> {
    init_logging(LoggingConfig::default().with_level(parse_level(level))).map_err(to_js_error)
}

#[derive(Serialize)]
struct ShellSummary {
    native: bool,
    platform: String,
}

/// What the shell reports right now.
#[wasm_bindgen(js_name = shellSummary)]
pub fn shell_summary() -> Result<JsValue, JsValue> {
    let shell = CapacitorShell::new();
    serde_wasm_bindgen::to_value(&ShellSummary {
        native: shell.is_native_platform(),
        platform: shell.platform(),
    })
    .map_err(to_js_error)
}
