//! # Native Shell Initialization
//!
//! One-time bootstrap run at process start.
//!
//! ## Sequence
//!
//! Inside a native shell, strictly in order:
//! 1. Status bar style (plus background color on Android)
//! 2. Hide the splash screen
//! 3. Notification channel and activation recording
//! 4. Hardware back-button interceptor
//! 5. Notification permission
//! 6. Device info
//! 7. Network watching
//!
//! Steps 1-4 run only when their plugin is present. The first failing step
//! ends the sequence; it is logged and reported in the [`InitReport`], never
//! returned as an error. Completed steps are not undone and nothing is
//! retried.
//!
//! ## Exactly once
//!
//! [`InitGuard`] is checked and advanced synchronously before the first
//! suspension point, so concurrent and repeated calls are no-ops.

use std::fmt;
use std::sync::{Arc, OnceLock};

use bridge_traits::{
    AppPlugin, BackButtonEvent, Listener, ListenerHandle, SplashScreenPlugin, StatusBarPlugin,
    WebPlatform,
};
use core_runtime::{CapabilityConfig, InitSettings, PluginSlot};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::device::DeviceCapability;
use crate::error::Result;
use crate::network::NetworkCapability;
use crate::notifications::NotificationCapability;
use crate::probe::{PlatformId, PlatformProbe};
use crate::provider::native_selected;

/// Progress of the one-time initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    NotStarted,
    Running,
    Done,
}

/// Exactly-once latch for initialization.
///
/// Share one guard between orchestrators to make initialization once per
/// process rather than once per orchestrator (see [`InitGuard::process_wide`]).
#[derive(Debug, Default)]
pub struct InitGuard {
    state: Mutex<InitState>,
}

impl InitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard shared by everything in this process.
    pub fn process_wide() -> Arc<InitGuard> {
        static GUARD: OnceLock<Arc<InitGuard>> = OnceLock::new();
        Arc::clone(GUARD.get_or_init(|| Arc::new(InitGuard::new())))
    }

    pub fn state(&self) -> InitState {
        *self.state.lock()
    }

    /// Move `NotStarted -> Running`. Returns `false` if initialization has
    /// already started or finished.
    pub fn try_begin(&self) -> bool {
        let mut state = self.state.lock();
        if *state != InitState::NotStarted {
            return false;
        }
        *state = InitState::Running;
        true
    }

    /// Mark initialization finished, whatever its outcome.
    pub fn finish(&self) {
        *self.state.lock() = InitState::Done;
    }
}

/// One step of the native bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStep {
    StatusBar,
    SplashScreen,
    NotificationChannel,
    BackButton,
    NotificationPermission,
    DeviceInfo,
    NetworkWatch,
}

impl InitStep {
    /// Execution order.
    pub const SEQUENCE: [InitStep; 7] = [
        InitStep::StatusBar,
        InitStep::SplashScreen,
        InitStep::NotificationChannel,
        InitStep::BackButton,
        InitStep::NotificationPermission,
        InitStep::DeviceInfo,
        InitStep::NetworkWatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InitStep::StatusBar => "status_bar",
            InitStep::SplashScreen => "splash_screen",
            InitStep::NotificationChannel => "notification_channel",
            InitStep::BackButton => "back_button",
            InitStep::NotificationPermission => "notification_permission",
            InitStep::DeviceInfo => "device_info",
            InitStep::NetworkWatch => "network_watch",
        }
    }
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitFailure {
    pub step: InitStep,
    pub message: String,
}

/// What a call to [`InitOrchestrator::initialize`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InitReport {
    /// Another call already started initialization.
    AlreadyStarted,
    /// Not inside a native shell; nothing to do.
    BrowserOnly,
    /// The native sequence ran, up to the first failure if any.
    Finished {
        completed: Vec<InitStep>,
        failure: Option<InitFailure>,
    },
}

impl InitReport {
    /// `true` unless a native step failed.
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            InitReport::Finished {
                failure: Some(_),
                ..
            }
        )
    }

    pub fn completed(&self) -> &[InitStep] {
        match self {
            InitReport::Finished { completed, .. } => completed,
            _ => &[],
        }
    }

    pub fn failure(&self) -> Option<&InitFailure> {
        match self {
            InitReport::Finished { failure, .. } => failure.as_ref(),
            _ => None,
        }
    }
}

/// Shell chrome plugins the bootstrap drives directly.
#[derive(Clone, Debug)]
pub struct ShellPlugins {
    pub status_bar: PluginSlot<dyn StatusBarPlugin>,
    pub splash_screen: PluginSlot<dyn SplashScreenPlugin>,
    pub app: PluginSlot<dyn AppPlugin>,
}

impl ShellPlugins {
    pub fn from_config(config: &CapabilityConfig) -> Self {
        Self {
            status_bar: config.plugins.status_bar.clone(),
            splash_screen: config.plugins.splash_screen.clone(),
            app: config.plugins.app.clone(),
        }
    }
}

pub struct InitOrchestrator {
    probe: PlatformProbe,
    guard: Arc<InitGuard>,
    settings: InitSettings,
    shell: ShellPlugins,
    web: Arc<dyn WebPlatform>,
    notifications: Arc<NotificationCapability>,
    device: Arc<DeviceCapability>,
    network: Arc<NetworkCapability>,
    back_button: Mutex<Option<Box<dyn ListenerHandle>>>,
}

impl InitOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        probe: PlatformProbe,
        guard: Arc<InitGuard>,
        settings: InitSettings,
        shell: ShellPlugins,
        web: Arc<dyn WebPlatform>,
        notifications: Arc<NotificationCapability>,
        device: Arc<DeviceCapability>,
        network: Arc<NetworkCapability>,
    ) -> Self {
        Self {
            probe,
            guard,
            settings,
            shell,
            web,
            notifications,
            device,
            network,
            back_button: Mutex::new(None),
        }
    }

    pub fn state(&self) -> InitState {
        self.guard.state()
    }

    /// Run the native bootstrap once. Never fails; see [`InitReport`].
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> InitReport {
        if !self.guard.try_begin() {
            debug!("Initialization already started");
            return InitReport::AlreadyStarted;
        }

        if !self.probe.is_native() {
            self.guard.finish();
            debug!("Not inside a native shell, skipping initialization");
            return InitReport::BrowserOnly;
        }

        info!(platform = %self.probe.platform(), "Initializing native shell");

        let mut completed = Vec::with_capacity(InitStep::SEQUENCE.len());
        let mut failure = None;

        for step in InitStep::SEQUENCE {
            match self.run_step(step).await {
                Ok(true) => {
                    info!(step = %step, "Init step completed");
                    completed.push(step);
                }
                Ok(false) => debug!(step = %step, "Init step skipped, plugin not present"),
                Err(err) => {
                    error!(step = %step, error = %err, "Native initialization failed");
                    failure = Some(InitFailure {
                        step,
                        message: err.to_string(),
                    });
                    break;
                }
            }
        }

        self.guard.finish();
        InitReport::Finished { completed, failure }
    }

    /// Returns whether the step ran.
    async fn run_step(&self, step: InitStep) -> Result<bool> {
        match step {
            InitStep::StatusBar => {
                let Some(status_bar) = self.load(&self.shell.status_bar)? else {
                    return Ok(false);
                };
                status_bar.set_style(self.settings.status_bar_style).await?;
                if self.probe.platform() == PlatformId::Android {
                    status_bar
                        .set_background_color(&self.settings.status_bar_color)
                        .await?;
                }
            }
            InitStep::SplashScreen => {
                let Some(splash) = self.load(&self.shell.splash_screen)? else {
                    return Ok(false);
                };
                splash.hide().await?;
            }
            InitStep::NotificationChannel => {
                if !self.notifications.uses_native() {
                    return Ok(false);
                }
                self.notifications
                    .create_channel(&self.settings.notification_channel)
                    .await?;
                self.notifications.record_activations().await?;
            }
            InitStep::BackButton => {
                let Some(app) = self.load(&self.shell.app)? else {
                    return Ok(false);
                };
                let handle = app
                    .add_back_button_listener(back_button_listener(
                        Arc::clone(&app),
                        Arc::clone(&self.web),
                    ))
                    .await?;
                *self.back_button.lock() = Some(handle);
            }
            InitStep::NotificationPermission => {
                self.notifications.request_permission().await?;
            }
            InitStep::DeviceInfo => {
                self.device.fetch_device_info().await?;
            }
            InitStep::NetworkWatch => {
                self.network.watch_network().await?;
            }
        }
        Ok(true)
    }

    fn load<P: ?Sized>(&self, slot: &PluginSlot<P>) -> Result<Option<Arc<P>>> {
        if native_selected(&self.probe, slot) {
            Ok(Some(slot.load()?))
        } else {
            Ok(None)
        }
    }
}

/// Go back one history step when possible, otherwise send the app to the
/// background.
fn back_button_listener(app: Arc<dyn AppPlugin>, web: Arc<dyn WebPlatform>) -> Listener<BackButtonEvent> {
    Arc::new(move |event: BackButtonEvent| {
        if event.can_go_back {
            if let Err(err) = web.history_back() {
                warn!(error = %err, "History back failed");
            }
        } else {
            let app = Arc::clone(&app);
            core_async::spawn_detached(async move {
                if let Err(err) = app.minimize_app().await {
                    warn!(error = %err, "Minimize request failed");
                }
            });
        }
    })
}
