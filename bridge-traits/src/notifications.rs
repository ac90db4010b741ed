//! Local notification plugin: delivery channels, permission, and activation
//! events.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    permissions::PermissionState,
    platform::{Listener, ListenerHandle, PlatformSendSync},
};

/// Lock-screen visibility of notifications posted to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum NotificationVisibility {
    Secret,
    Private,
    #[default]
    Public,
}

impl From<NotificationVisibility> for i8 {
    fn from(value: NotificationVisibility) -> Self {
        match value {
            NotificationVisibility::Secret => -1,
            NotificationVisibility::Private => 0,
            NotificationVisibility::Public => 1,
        }
    }
}

impl TryFrom<i8> for NotificationVisibility {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(NotificationVisibility::Secret),
            0 => Ok(NotificationVisibility::Private),
            1 => Ok(NotificationVisibility::Public),
            other => Err(format!("invalid notification visibility {other}")),
        }
    }
}

/// Delivery channel definition (Android notification channels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 1 (min) to 5 (max)
    pub importance: u8,
    pub visibility: NotificationVisibility,
    pub vibration: bool,
    /// Sound resource name; `None` uses the system default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

/// A notification was tapped or one of its actions was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub action_id: String,
    pub notification_id: i64,
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait LocalNotificationsPlugin: PlatformSendSync {
    /// Create or update a delivery channel.
    async fn create_channel(&self, channel: &NotificationChannel) -> Result<()>;

    /// Prompt the user for notification permission if not yet decided.
    async fn request_permissions(&self) -> Result<PermissionState>;

    /// Subscribe to notification activation events.
    async fn add_action_performed_listener(
        &self,
        listener: Listener<NotificationAction>,
    ) -> Result<Box<dyn ListenerHandle>>;
}
