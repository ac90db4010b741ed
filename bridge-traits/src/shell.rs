//! Native shell chrome: status bar, splash screen, and app lifecycle plugins.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    platform::{Listener, ListenerHandle, PlatformSendSync},
};

/// Status bar text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusBarStyle {
    /// Light text for dark backgrounds
    Dark,
    /// Dark text for light backgrounds
    Light,
    #[default]
    Default,
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait StatusBarPlugin: PlatformSendSync {
    async fn set_style(&self, style: StatusBarStyle) -> Result<()>;

    /// Set the bar background as a `#RRGGBB` hex color. Android only.
    async fn set_background_color(&self, color: &str) -> Result<()>;
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait SplashScreenPlugin: PlatformSendSync {
    /// Dismiss the launch splash screen.
    async fn hide(&self) -> Result<()>;
}

/// Payload of the hardware back-button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackButtonEvent {
    /// Whether the web view has history to go back to
    pub can_go_back: bool,
}

/// App lifecycle plugin.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait AppPlugin: PlatformSendSync {
    /// Intercept the hardware back button. While a listener is attached the
    /// shell no longer performs its default back action.
    async fn add_back_button_listener(
        &self,
        listener: Listener<BackButtonEvent>,
    ) -> Result<Box<dyn ListenerHandle>>;

    /// Send the app to the background.
    async fn minimize_app(&self) -> Result<()>;
}
