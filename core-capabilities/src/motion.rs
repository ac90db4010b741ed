//! # Motion Capability
//!
//! Accelerometer samples behind a per-session permission gate.
//!
//! ## Permission
//!
//! The gate starts `Unknown` and resolves to `Granted` or `Denied` on the
//! first [`MotionCapability::request_permission`] call. Once resolved it is
//! not asked again for the lifetime of the capability.
//!
//! ## Subscriptions
//!
//! At most one subscription is active. Starting a new one removes the
//! previous subscription first, so only the latest consumer receives samples.

use std::sync::Arc;

use bridge_traits::{
    plugins, AccelEvent, DeviceMotion, Listener, ListenerHandle, MotionPlugin, MotionSupport,
    PermissionState, WebPlatform,
};
use core_runtime::{CapabilityConfig, PluginSlot};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{CapabilityError, Result};
use crate::probe::PlatformProbe;
use crate::provider::{native_selected, select, Provider};

/// One acceleration reading including gravity, in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<AccelEvent> for MotionSample {
    fn from(event: AccelEvent) -> Self {
        let axes = event.acceleration_including_gravity;
        Self {
            x: axes.x,
            y: axes.y,
            z: axes.z,
        }
    }
}

impl From<DeviceMotion> for MotionSample {
    fn from(event: DeviceMotion) -> Self {
        let axes = event.acceleration_including_gravity.unwrap_or_default();
        Self {
            x: axes.x.unwrap_or(0.0),
            y: axes.y.unwrap_or(0.0),
            z: axes.z.unwrap_or(0.0),
        }
    }
}

pub struct MotionCapability {
    probe: PlatformProbe,
    plugin: PluginSlot<dyn MotionPlugin>,
    web: Arc<dyn WebPlatform>,
    permission: Mutex<PermissionState>,
    active: Mutex<Option<Box<dyn ListenerHandle>>>,
}

impl MotionCapability {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self::with_parts(
            PlatformProbe::new(Arc::clone(&config.shell)),
            config.plugins.motion.clone(),
            Arc::clone(&config.web),
        )
    }

    pub fn with_parts(
        probe: PlatformProbe,
        plugin: PluginSlot<dyn MotionPlugin>,
        web: Arc<dyn WebPlatform>,
    ) -> Self {
        Self {
            probe,
            plugin,
            web,
            permission: Mutex::new(PermissionState::Unknown),
            active: Mutex::new(None),
        }
    }

    pub fn permission(&self) -> PermissionState {
        *self.permission.lock()
    }

    pub fn is_listening(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Resolve the permission gate. Returns whether samples may be read.
    #[instrument(skip(self))]
    pub async fn request_permission(&self) -> bool {
        let current = self.permission();
        if current.is_resolved() {
            return current.is_granted();
        }

        let granted = if native_selected(&self.probe, &self.plugin) {
            true
        } else {
            match self.web.motion_support() {
                MotionSupport::Unsupported => false,
                MotionSupport::Implicit => true,
                MotionSupport::ExplicitConsent => match self.web.request_motion_permission().await {
                    Ok(answer) => answer == "granted",
                    Err(err) => {
                        warn!(error = %err, "Motion consent request failed");
                        false
                    }
                },
            }
        };

        let mut permission = self.permission.lock();
        // Another request may have resolved the gate while this one awaited.
        if !permission.is_resolved() {
            *permission = PermissionState::from(granted);
            info!(granted, plugin = plugins::MOTION, "Motion permission resolved");
        }
        permission.is_granted()
    }

    /// Subscribe `on_sample` to acceleration samples.
    ///
    /// Any previous subscription is removed first.
    ///
    /// # Errors
    ///
    /// - [`CapabilityError::PermissionDenied`] when the gate resolved to `Denied`
    /// - bridge errors from the subscription call
    #[instrument(skip(self, on_sample))]
    pub async fn start_listening(&self, on_sample: Listener<MotionSample>) -> Result<()> {
        if self.permission() == PermissionState::Denied {
            return Err(CapabilityError::PermissionDenied(
                "motion access was denied for this session".to_string(),
            ));
        }

        self.stop_listening().await?;

        let handle = match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => {
                let listener: Listener<AccelEvent> =
                    Arc::new(move |event: AccelEvent| on_sample(event.into()));
                plugin.add_accel_listener(listener).await?
            }
            Provider::Web(web) => {
                let listener: Listener<DeviceMotion> =
                    Arc::new(move |event: DeviceMotion| on_sample(event.into()));
                web.add_device_motion_listener(listener)?
            }
        };

        let previous = self.active.lock().replace(handle);
        if let Some(previous) = previous {
            // Installed by a concurrent start while this one awaited.
            previous.remove().await?;
        }
        debug!("Motion subscription active");
        Ok(())
    }

    /// Remove the active subscription. No-op when nothing is active.
    #[instrument(skip(self))]
    pub async fn stop_listening(&self) -> Result<()> {
        let handle = self.active.lock().take();
        if let Some(handle) = handle {
            handle.remove().await?;
            debug!("Motion subscription removed");
        }
        Ok(())
    }
}
