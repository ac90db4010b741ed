//! [`WebStorage`] over `window.localStorage`.
//!
//! Keys are stored as given; the capability layer owns key naming, including
//! the offline cache prefix.

use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    WebStorage,
};
use wasm_bindgen::JsValue;

use crate::error::js_message;

fn js_error(context: &str, err: JsValue) -> BridgeError {
    BridgeError::OperationFailed(format!("localStorage {context}: {}", js_message(&err)))
}

/// Resolve the storage object. Private browsing modes may refuse access.
fn local_storage() -> BridgeResult<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".into()))?;
    window
        .local_storage()
        .map_err(|err| js_error("access", err))?
        .ok_or_else(|| BridgeError::NotAvailable("localStorage".into()))
}

#[derive(Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> BridgeResult<Self> {
        Ok(Self {
            storage: local_storage()?,
        })
    }
}

impl WebStorage for LocalStorage {
    fn get_item(&self, key: &str) -> BridgeResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| js_error("getItem", err))
    }

    fn set_item(&self, key: &str, value: &str) -> BridgeResult<()> {
        // Throws QuotaExceededError when full.
        self.storage
            .set_item(key, value)
            .map_err(|err| js_error("setItem", err))
    }

    fn remove_item(&self, key: &str) -> BridgeResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| js_error("removeItem", err))
    }
}
