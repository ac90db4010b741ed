//! Access to the native shell's plugin bridge.
//!
//! # Host Requirements
//!
//! Inside a native shell the web view exposes a global `Capacitor` object:
//!
//! - `Capacitor.isNativePlatform() -> bool`
//! - `Capacitor.getPlatform() -> "ios" | "android" | "web"`
//! - `Capacitor.isPluginAvailable(name) -> bool`
//! - `Capacitor.Plugins.<Name>.<method>(options) -> Promise`
//! - `Capacitor.Plugins.<Name>.addListener(event, callback) -> Promise<{ remove() }>`
//!
//! In a plain browser the global is absent and [`CapacitorShell`] reports a
//! web environment with no plugins.

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult, Listener, ListenerHandle, ShellEnvironment,
};
use js_sys::{Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{WasmError, WasmResult};

const CAPACITOR_GLOBAL: &str = "Capacitor";

fn capacitor() -> Option<JsValue> {
    let global = js_sys::global();
    Reflect::get(&global, &JsValue::from_str(CAPACITOR_GLOBAL))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn invoke(target: &JsValue, method: &str, args: &[JsValue]) -> WasmResult<JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into()
        .map_err(|_| WasmError::NotAvailable(format!("{method} is not a function")))?;
    let result = match args {
        [] => function.call0(target)?,
        [first] => function.call1(target, first)?,
        [first, second] => function.call2(target, first, second)?,
        _ => {
            let array: js_sys::Array = args.iter().collect();
            function.apply(target, &array)?
        }
    };
    Ok(result)
}

/// Await `value` when it is a promise, pass it through otherwise.
async fn settle(value: JsValue) -> WasmResult<JsValue> {
    match value.dyn_into::<Promise>() {
        Ok(promise) => Ok(JsFuture::from(promise).await?),
        Err(plain) => Ok(plain),
    }
}

/// [`ShellEnvironment`] backed by the `Capacitor` global.
///
/// Every query reads the global again, so a shell injected after startup is
/// picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorShell;

impl CapacitorShell {
    pub fn new() -> Self {
        Self
    }

    fn ask(&self, method: &str, args: &[JsValue]) -> Option<JsValue> {
        let runtime = capacitor()?;
        match invoke(&runtime, method, args) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(method, error = %err, "Shell query failed");
                None
            }
        }
    }
}

impl ShellEnvironment for CapacitorShell {
    fn is_native_platform(&self) -> bool {
        self.ask("isNativePlatform", &[])
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn platform(&self) -> String {
        self.ask("getPlatform", &[])
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| "web".to_string())
    }

    fn is_plugin_available(&self, name: &str) -> bool {
        self.ask("isPluginAvailable", &[JsValue::from_str(name)])
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

/// One plugin registered with the shell, addressed by name.
#[derive(Debug, Clone)]
pub struct CapacitorPlugin {
    name: &'static str,
    object: JsValue,
}

impl CapacitorPlugin {
    /// Resolve `Capacitor.Plugins.<name>`.
    pub fn resolve(name: &'static str) -> WasmResult<Self> {
        let runtime = capacitor()
            .ok_or_else(|| WasmError::NotAvailable("Capacitor runtime".to_string()))?;
        let plugins = Reflect::get(&runtime, &JsValue::from_str("Plugins"))?;
        let object = Reflect::get(&plugins, &JsValue::from_str(name))?;
        if object.is_undefined() || object.is_null() {
            return Err(WasmError::NotAvailable(format!("plugin {name}")));
        }
        Ok(Self { name, object })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call `method` with optional options and await its result.
    pub async fn call<A: Serialize + ?Sized>(
        &self,
        method: &str,
        options: Option<&A>,
    ) -> WasmResult<JsValue> {
        let args = match options {
            Some(options) => vec![serde_wasm_bindgen::to_value(options)?],
            None => Vec::new(),
        };
        let pending = invoke(&self.object, method, &args).map_err(|err| self.failure(method, err))?;
        settle(pending).await.map_err(|err| self.failure(method, err))
    }

    /// Call `method` and decode its result.
    pub async fn call_as<A, T>(&self, method: &str, options: Option<&A>) -> WasmResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.call(method, options).await?;
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// Subscribe to `event`, decoding every payload into `T`.
    ///
    /// Payloads that fail to decode are logged and dropped.
    pub async fn add_listener<T, F>(
        &self,
        event: &'static str,
        map: F,
        listener: Listener<T>,
    ) -> WasmResult<Box<dyn ListenerHandle>>
    where
        T: 'static,
        F: Fn(JsValue) -> WasmResult<T> + 'static,
    {
        let plugin = self.name;
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            match map(payload) {
                Ok(value) => listener(value),
                Err(err) => warn!(plugin, event, error = %err, "Dropping undecodable event"),
            }
        });

        let pending = invoke(
            &self.object,
            "addListener",
            &[JsValue::from_str(event), callback.as_ref().clone()],
        )
        .map_err(|err| self.failure("addListener", err))?;
        let handle = settle(pending)
            .await
            .map_err(|err| self.failure("addListener", err))?;

        debug!(plugin, event, "Listener registered");
        Ok(Box::new(CapacitorListenerHandle {
            handle,
            _callback: callback,
        }))
    }

    fn failure(&self, method: &str, err: WasmError) -> WasmError {
        match err {
            WasmError::JavaScript(message) => {
                WasmError::JavaScript(format!("{}.{method}: {message}", self.name))
            }
            other => other,
        }
    }
}

/// Decode an event payload with serde.
pub fn decode<T: DeserializeOwned>(payload: JsValue) -> WasmResult<T> {
    Ok(serde_wasm_bindgen::from_value(payload)?)
}

/// Keeps the JS callback alive until the subscription is removed.
struct CapacitorListenerHandle {
    handle: JsValue,
    _callback: Closure<dyn FnMut(JsValue)>,
}

#[async_trait(?Send)]
impl ListenerHandle for CapacitorListenerHandle {
    async fn remove(self: Box<Self>) -> BridgeResult<()> {
        let pending = invoke(&self.handle, "remove", &[])?;
        settle(pending).await?;
        Ok(())
    }
}
