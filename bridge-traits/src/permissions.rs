//! Tri-state permission gate shared by capabilities that need consent.

use serde::{Deserialize, Serialize};

/// Outcome of a permission request.
///
/// `Unknown` until the first request resolves; `Granted` and `Denied` are
/// terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    /// Map a host permission string (`"granted"`, `"denied"`, `"prompt"`,
    /// `"default"`, ...) onto the gate.
    pub fn from_display(value: &str) -> Self {
        match value {
            "granted" => PermissionState::Granted,
            "denied" => PermissionState::Denied,
            _ => PermissionState::Unknown,
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, PermissionState::Unknown)
    }

    pub fn is_granted(self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

impl From<bool> for PermissionState {
    fn from(granted: bool) -> Self {
        if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}
