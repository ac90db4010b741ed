//! Runtime utilities that abstract over the underlying async executor.

// ============================================================================
// Native Implementation (Tokio)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::runtime::Handle;

/// Runs the provided future to completion on a fresh current-thread runtime.
///
/// Must not be called from inside a Tokio worker; use
/// [`crate::task::spawn_detached`] there instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(future),
        // Building a current-thread runtime only fails when the OS refuses
        // the timer/IO drivers; fall back to a plain executor.
        Err(err) => {
            tracing::warn!(error = %err, "tokio runtime unavailable, using futures executor");
            futures::executor::block_on(future)
        }
    }
}

/// Returns `true` when called from inside a Tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn has_current_runtime() -> bool {
    Handle::try_current().is_ok()
}

// ============================================================================
// WASM Implementation
// ============================================================================

/// Drives an immediately-ready future on a local pool.
///
/// The browser cannot block, so futures awaiting promises or timers never
/// complete here. Keep callers `async` and prefer
/// [`crate::task::spawn_detached`].
#[cfg(target_arch = "wasm32")]
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    futures::executor::LocalPool::new().run_until(future)
}

#[cfg(target_arch = "wasm32")]
pub fn has_current_runtime() -> bool {
    true
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_block_on_outside_runtime() {
        assert!(!has_current_runtime());
        let value = block_on(async { 21 * 2 });
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_detects_current_runtime() {
        assert!(has_current_runtime());
    }
}
