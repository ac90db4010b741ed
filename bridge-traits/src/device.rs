//! Device identity and battery queries.

use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// Static identity reported by the `Device.getInfo` bridge call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeDeviceInfo {
    pub model: String,
    pub platform: String,
    pub operating_system: String,
    pub os_version: String,
    pub manufacturer: String,
    pub is_virtual: bool,
}

/// Battery telemetry reported by `Device.getBatteryInfo`.
///
/// Either field may be missing when the hardware cannot report it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryInfo {
    /// Charge level in `[0, 1]`
    #[serde(default)]
    pub battery_level: Option<f32>,
    #[serde(default)]
    pub is_charging: Option<bool>,
}

/// Native device plugin.
///
/// # Platform Support
///
/// - **iOS**: `UIDevice`, `ProcessInfo`
/// - **Android**: `Build`, `BatteryManager`
/// - **Web**: not provided; the capability layer synthesizes identity from
///   navigator facts instead
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait DevicePlugin: PlatformSendSync {
    /// Query static device identity.
    async fn get_info(&self) -> Result<NativeDeviceInfo>;

    /// Query battery level and charging state.
    async fn get_battery_info(&self) -> Result<BatteryInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_wire_shape() {
        let raw = r#"{
            "model": "iPhone13,2",
            "platform": "ios",
            "operatingSystem": "ios",
            "osVersion": "17.1",
            "manufacturer": "Apple",
            "isVirtual": false,
            "webViewVersion": "17.1"
        }"#;

        let info: NativeDeviceInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.model, "iPhone13,2");
        assert_eq!(info.operating_system, "ios");
        assert!(!info.is_virtual);
    }

    #[test]
    fn test_battery_fields_optional() {
        let battery: BatteryInfo = serde_json::from_str(r#"{"batteryLevel": 0.5}"#).unwrap();
        assert_eq!(battery.battery_level, Some(0.5));
        assert_eq!(battery.is_charging, None);
    }
}
