//! [`WebPlatform`] over the standard browser APIs.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    ConnectivityEvent, DeviceMotion, Listener, ListenerHandle, MotionSupport, PartialAcceleration,
    WebPlatform,
};
use js_sys::{Function, Reflect};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{js_message, WasmError, WasmResult};

fn window() -> WasmResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| WasmError::NotAvailable("window".to_string()))
}

fn js_error(context: &str, err: JsValue) -> BridgeError {
    BridgeError::OperationFailed(format!("{context}: {}", js_message(&err)))
}

fn global_property(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

type EventCallback = Closure<dyn FnMut(web_sys::Event)>;

/// Window event listeners removed together.
struct WindowListeners {
    window: web_sys::Window,
    registrations: Vec<(&'static str, EventCallback)>,
}

impl WindowListeners {
    fn attach(
        window: web_sys::Window,
        registrations: Vec<(&'static str, EventCallback)>,
    ) -> WasmResult<Self> {
        for (event, callback) in &registrations {
            window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        }
        Ok(Self {
            window,
            registrations,
        })
    }
}

#[async_trait(?Send)]
impl ListenerHandle for WindowListeners {
    async fn remove(self: Box<Self>) -> BridgeResult<()> {
        for (event, callback) in &self.registrations {
            self.window
                .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                .map_err(|err| js_error("removeEventListener", err))?;
        }
        Ok(())
    }
}

/// Browser implementation of [`WebPlatform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl WebPlatform for BrowserPlatform {
    fn navigator_platform(&self) -> String {
        window()
            .ok()
            .and_then(|window| window.navigator().platform().ok())
            .unwrap_or_default()
    }

    fn user_agent(&self) -> String {
        window()
            .ok()
            .and_then(|window| window.navigator().user_agent().ok())
            .unwrap_or_default()
    }

    fn is_online(&self) -> bool {
        window()
            .map(|window| window.navigator().on_line())
            .unwrap_or(true)
    }

    fn add_connectivity_listener(
        &self,
        listener: Listener<ConnectivityEvent>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        let on_online = {
            let listener = listener.clone();
            EventCallback::new(move |_: web_sys::Event| listener(ConnectivityEvent::Online))
        };
        let on_offline =
            EventCallback::new(move |_: web_sys::Event| listener(ConnectivityEvent::Offline));

        let listeners = WindowListeners::attach(
            window()?,
            vec![("online", on_online), ("offline", on_offline)],
        )?;
        debug!("Connectivity listeners attached");
        Ok(Box::new(listeners))
    }

    fn motion_support(&self) -> MotionSupport {
        match global_property("DeviceMotionEvent") {
            None => MotionSupport::Unsupported,
            Some(constructor) => {
                let request = Reflect::get(&constructor, &JsValue::from_str("requestPermission"))
                    .unwrap_or(JsValue::UNDEFINED);
                if request.is_function() {
                    MotionSupport::ExplicitConsent
                } else {
                    MotionSupport::Implicit
                }
            }
        }
    }

    async fn request_motion_permission(&self) -> BridgeResult<String> {
        let constructor = global_property("DeviceMotionEvent")
            .ok_or_else(|| BridgeError::NotAvailable("DeviceMotionEvent".to_string()))?;
        let request: Function = Reflect::get(&constructor, &JsValue::from_str("requestPermission"))
            .map_err(|err| js_error("DeviceMotionEvent.requestPermission", err))?
            .dyn_into()
            .map_err(|_| {
                BridgeError::NotAvailable("DeviceMotionEvent.requestPermission".to_string())
            })?;

        let pending = request
            .call0(&constructor)
            .map_err(|err| js_error("DeviceMotionEvent.requestPermission", err))?;
        let answer = JsFuture::from(js_sys::Promise::resolve(&pending))
            .await
            .map_err(|err| js_error("DeviceMotionEvent.requestPermission", err))?;
        Ok(answer.as_string().unwrap_or_default())
    }

    fn add_device_motion_listener(
        &self,
        listener: Listener<DeviceMotion>,
    ) -> BridgeResult<Box<dyn ListenerHandle>> {
        let on_motion = EventCallback::new(move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<web_sys::DeviceMotionEvent>() else {
                return;
            };
            let acceleration_including_gravity =
                event
                    .acceleration_including_gravity()
                    .map(|axes| PartialAcceleration {
                        x: axes.x(),
                        y: axes.y(),
                        z: axes.z(),
                    });
            listener(DeviceMotion {
                acceleration_including_gravity,
            });
        });

        let listeners = WindowListeners::attach(window()?, vec![("devicemotion", on_motion)])?;
        Ok(Box::new(listeners))
    }

    fn history_length(&self) -> u32 {
        window()
            .ok()
            .and_then(|window| window.history().ok())
            .and_then(|history| history.length().ok())
            .unwrap_or(0)
    }

    fn history_back(&self) -> BridgeResult<()> {
        window()?
            .history()
            .and_then(|history| history.back())
            .map_err(|err| js_error("history.back", err))
    }

    fn notifications_supported(&self) -> bool {
        global_property("Notification").is_some()
    }

    async fn request_notification_permission(&self) -> BridgeResult<String> {
        if !self.notifications_supported() {
            return Err(BridgeError::NotAvailable("Notification".to_string()));
        }
        let pending = web_sys::Notification::request_permission()
            .map_err(|err| js_error("Notification.requestPermission", err))?;
        let answer = JsFuture::from(pending)
            .await
            .map_err(|err| js_error("Notification.requestPermission", err))?;
        Ok(answer.as_string().unwrap_or_default())
    }
}
