//! # Device Capability
//!
//! Static device identity plus battery telemetry.
//!
//! Inside a native shell with the `Device` plugin the answer comes from the
//! plugin. Everywhere else it is synthesized from navigator facts so callers
//! always get a `DeviceInfo`.

use std::sync::Arc;

use bridge_traits::{BatteryInfo, DevicePlugin, NativeDeviceInfo, WebPlatform};
use core_runtime::{CapabilityConfig, PluginSlot};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::probe::PlatformProbe;
use crate::provider::{select, Provider};

/// Device identity and, when reported, battery state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub model: String,
    pub platform: String,
    pub operating_system: String,
    pub os_version: String,
    pub manufacturer: String,
    pub is_virtual: bool,
    /// Charge in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_charging: Option<bool>,
}

impl DeviceInfo {
    fn from_native(info: NativeDeviceInfo, battery: BatteryInfo) -> Self {
        Self {
            model: info.model,
            platform: info.platform,
            operating_system: info.operating_system,
            os_version: info.os_version,
            manufacturer: info.manufacturer,
            is_virtual: info.is_virtual,
            battery_level: battery.battery_level.filter(|level| (0.0..=1.0).contains(level)),
            is_charging: battery.is_charging,
        }
    }

    fn from_browser(web: &dyn WebPlatform) -> Self {
        let user_agent = web.user_agent();
        Self {
            model: web.navigator_platform(),
            platform: "web".to_string(),
            operating_system: infer_operating_system(&user_agent).to_string(),
            os_version: user_agent,
            manufacturer: "Unknown".to_string(),
            is_virtual: false,
            battery_level: None,
            is_charging: None,
        }
    }
}

/// Best-effort operating system family from a user agent string.
pub fn infer_operating_system(user_agent: &str) -> &'static str {
    let ua = user_agent.to_ascii_lowercase();
    // iOS agents also claim "like Mac OS X", so check them first.
    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        "ios"
    } else if ua.contains("android") {
        "android"
    } else if ua.contains("macintosh") || ua.contains("mac os") {
        "mac"
    } else if ua.contains("windows") {
        "windows"
    } else {
        "unknown"
    }
}

pub struct DeviceCapability {
    probe: PlatformProbe,
    plugin: PluginSlot<dyn DevicePlugin>,
    web: Arc<dyn WebPlatform>,
    info: Mutex<Option<DeviceInfo>>,
}

impl DeviceCapability {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self::with_parts(
            PlatformProbe::new(Arc::clone(&config.shell)),
            config.plugins.device.clone(),
            Arc::clone(&config.web),
        )
    }

    pub fn with_parts(
        probe: PlatformProbe,
        plugin: PluginSlot<dyn DevicePlugin>,
        web: Arc<dyn WebPlatform>,
    ) -> Self {
        Self {
            probe,
            plugin,
            web,
            info: Mutex::new(None),
        }
    }

    /// Last fetched device info, if any.
    pub fn info(&self) -> Option<DeviceInfo> {
        self.info.lock().clone()
    }

    /// Query the environment and replace the held snapshot.
    ///
    /// # Errors
    ///
    /// Fails only when the native identity query fails. A failed battery
    /// query yields absent battery fields.
    #[instrument(skip(self))]
    pub async fn fetch_device_info(&self) -> Result<DeviceInfo> {
        let info = match select(&self.probe, &self.plugin, &self.web)? {
            Provider::Native(plugin) => {
                let identity = plugin.get_info().await?;
                let battery = match plugin.get_battery_info().await {
                    Ok(battery) => battery,
                    Err(err) => {
                        warn!(error = %err, "Battery query failed, omitting battery fields");
                        BatteryInfo::default()
                    }
                };
                DeviceInfo::from_native(identity, battery)
            }
            Provider::Web(web) => DeviceInfo::from_browser(web.as_ref()),
        };

        debug!(
            platform = %info.platform,
            model = %info.model,
            has_battery = info.battery_level.is_some(),
            "Device info fetched"
        );

        *self.info.lock() = Some(info.clone());
        Ok(info)
    }
}
