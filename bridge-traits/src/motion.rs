//! Accelerometer events from the native motion plugin.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    platform::{Listener, ListenerHandle, PlatformSendSync},
};

/// Three-axis acceleration in the units reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Payload of the native `accel` event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelEvent {
    #[serde(default)]
    pub acceleration: Acceleration,
    pub acceleration_including_gravity: Acceleration,
    /// Sampling interval in milliseconds
    #[serde(default)]
    pub interval: f64,
}

/// Native motion plugin.
///
/// Native shells grant motion access implicitly; there is no permission call.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait MotionPlugin: PlatformSendSync {
    /// Subscribe to accelerometer events.
    async fn add_accel_listener(
        &self,
        listener: Listener<AccelEvent>,
    ) -> Result<Box<dyn ListenerHandle>>;
}
