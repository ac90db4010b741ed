//! # Capability Error Types

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors surfaced by capability operations.
///
/// Environment mismatches never show up here: they resolve to the browser
/// provider. What remains are transport failures, unusable payloads and
/// explicit permission refusals.
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// A bridge call was rejected or a plugin binding failed to load.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A value could not be encoded for storage.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The capability's permission gate is closed.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Runtime(#[from] core_runtime::Error),
}

pub type Result<T> = std::result::Result<T, CapabilityError>;
