use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Bridge payload could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Failure reported by a native plugin method call.
    pub fn plugin_call(plugin: &str, method: &str, message: impl std::fmt::Display) -> Self {
        BridgeError::OperationFailed(format!("{plugin}.{method}: {message}"))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_call_message() {
        let err = BridgeError::plugin_call("Device", "getInfo", "bridge rejected");
        assert_eq!(
            err.to_string(),
            "Bridge operation failed: Device.getInfo: bridge rejected"
        );
    }
}
