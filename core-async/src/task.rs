//! Fire-and-forget task spawning.
//!
//! Listener callbacks delivered by a plugin bridge are synchronous, but the
//! work they trigger (minimizing the app, writing state) is async. This module
//! hands that work to whichever executor is driving the current target.
//!
//! ## Native (Tokio)
//! - Spawns onto the ambient runtime when one exists
//! - Otherwise runs the future on a short-lived helper thread
//! - Futures must be `Send + 'static`
//!
//! ## WASM
//! - Uses `wasm_bindgen_futures::spawn_local`
//! - Futures only need to be `'static`

#[cfg(not(target_arch = "wasm32"))]
/// Spawns a future without waiting for its completion.
pub fn spawn_detached<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    match crate::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            let spawned = std::thread::Builder::new()
                .name("core-async-detached".into())
                .spawn(move || crate::runtime::block_on(future));
            if let Err(err) = spawned {
                tracing::error!(error = %err, "failed to spawn detached task thread");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
/// Spawns a future on the browser event loop.
pub fn spawn_detached<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_spawn_inside_runtime() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        spawn_detached(async move {
            let _ = tx.send(7);
        });
        assert_eq!(rx.await.unwrap(), 7);
    }

    #[test]
    fn test_spawn_without_runtime_uses_helper_thread() {
        let (tx, rx) = mpsc::channel();
        spawn_detached(async move {
            tx.send("done").unwrap();
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "done");
    }
}
