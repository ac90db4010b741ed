//! Per-call provider selection.

use std::sync::Arc;

use core_runtime::PluginSlot;
use tracing::warn;

use crate::error::Result;
use crate::probe::PlatformProbe;

/// The two ways a capability can be served.
pub enum Provider<N, W> {
    /// Native shell plugin binding
    Native(N),
    /// Standard browser APIs
    Web(W),
}

impl<N, W> Provider<N, W> {
    pub fn is_native(&self) -> bool {
        matches!(self, Provider::Native(_))
    }
}

/// Whether the native path applies to `slot` right now.
///
/// Requires a native shell, the plugin registered with it, and a binding
/// configured by the host. A registered plugin without a binding falls back
/// to the browser path.
pub(crate) fn native_selected<P: ?Sized>(probe: &PlatformProbe, slot: &PluginSlot<P>) -> bool {
    if !probe.is_plugin_available(slot.name()) {
        return false;
    }
    if !slot.is_configured() {
        warn!(
            plugin = slot.name(),
            "Plugin registered with the shell but no binding configured, using browser path"
        );
        return false;
    }
    true
}

/// Pick the provider for one call, loading the native binding on demand.
pub(crate) fn select<P: ?Sized, W>(
    probe: &PlatformProbe,
    slot: &PluginSlot<P>,
    web: W,
) -> Result<Provider<Arc<P>, W>> {
    if native_selected(probe, slot) {
        Ok(Provider::Native(slot.load()?))
    } else {
        Ok(Provider::Web(web))
    }
}
