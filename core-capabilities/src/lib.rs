//! # Device Capabilities
//!
//! One API for device features whether the code runs inside a native
//! application shell or in a plain browser tab.
//!
//! ## Overview
//!
//! Every operation picks its provider at call time: the native plugin when
//! the shell is present and the plugin is registered and bound, the
//! equivalent browser API otherwise. Callers never branch on the environment.
//!
//! - [`probe`] - Environment detection
//! - [`device`] - Device identity and battery
//! - [`network`] - Connectivity snapshot and change subscription
//! - [`motion`] - Accelerometer permission and streaming
//! - [`storage`] - Key-value storage and the offline cache
//! - [`notifications`] - Notification permission and channels
//! - [`init`] - One-time native shell bootstrap
//!
//! ## Usage
//!
//! ```ignore
//! use core_capabilities::Capabilities;
//!
//! let capabilities = Capabilities::new(config);
//! capabilities.initialize().await;
//!
//! let status = capabilities.network().status();
//! capabilities.storage().cache_for_offline("feed", &items).await?;
//! ```

pub mod device;
pub mod error;
pub mod init;
pub mod motion;
pub mod network;
pub mod notifications;
pub mod probe;
pub mod provider;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use device::{infer_operating_system, DeviceCapability, DeviceInfo};
pub use error::{CapabilityError, Result};
pub use init::{
    InitFailure, InitGuard, InitOrchestrator, InitReport, InitState, InitStep, ShellPlugins,
};
pub use motion::{MotionCapability, MotionSample};
pub use network::{NetworkCapability, NetworkStatus, UNKNOWN_CONNECTION_TYPE};
pub use notifications::NotificationCapability;
pub use probe::{PlatformFact, PlatformId, PlatformProbe};
pub use provider::Provider;
pub use storage::{CacheEnvelope, StorageCapability};

use std::sync::Arc;

use core_runtime::CapabilityConfig;
use tracing::debug;

/// Every capability built from one [`CapabilityConfig`].
///
/// Clones share state: one network snapshot, one motion subscription, one
/// initialization.
#[derive(Clone)]
pub struct Capabilities {
    probe: PlatformProbe,
    device: Arc<DeviceCapability>,
    network: Arc<NetworkCapability>,
    motion: Arc<MotionCapability>,
    storage: Arc<StorageCapability>,
    notifications: Arc<NotificationCapability>,
    init: Arc<InitOrchestrator>,
}

impl Capabilities {
    /// Build the capabilities with the process-wide initialization guard.
    pub fn new(config: CapabilityConfig) -> Self {
        Self::with_guard(config, InitGuard::process_wide())
    }

    /// Build the capabilities with a caller-supplied initialization guard.
    pub fn with_guard(config: CapabilityConfig, guard: Arc<InitGuard>) -> Self {
        let probe = PlatformProbe::new(Arc::clone(&config.shell));
        let device = Arc::new(DeviceCapability::new(&config));
        let network = Arc::new(NetworkCapability::new(&config));
        let motion = Arc::new(MotionCapability::new(&config));
        let storage = Arc::new(StorageCapability::new(&config));
        let notifications = Arc::new(NotificationCapability::new(&config));

        let init = Arc::new(InitOrchestrator::new(
            probe.clone(),
            guard,
            config.init.clone(),
            ShellPlugins::from_config(&config),
            Arc::clone(&config.web),
            Arc::clone(&notifications),
            Arc::clone(&device),
            Arc::clone(&network),
        ));

        debug!(
            native = probe.is_native(),
            configured = ?config.plugins.configured(),
            "Capabilities created"
        );

        Self {
            probe,
            device,
            network,
            motion,
            storage,
            notifications,
            init,
        }
    }

    pub fn probe(&self) -> &PlatformProbe {
        &self.probe
    }

    pub fn device(&self) -> &DeviceCapability {
        &self.device
    }

    pub fn network(&self) -> &NetworkCapability {
        &self.network
    }

    pub fn motion(&self) -> &MotionCapability {
        &self.motion
    }

    pub fn storage(&self) -> &StorageCapability {
        &self.storage
    }

    pub fn notifications(&self) -> &NotificationCapability {
        &self.notifications
    }

    pub fn init_state(&self) -> InitState {
        self.init.state()
    }

    /// Run the one-time native bootstrap. See [`InitOrchestrator::initialize`].
    pub async fn initialize(&self) -> InitReport {
        self.init.initialize().await
    }
}
