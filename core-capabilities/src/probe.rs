//! Environment detection.
//!
//! [`PlatformProbe`] answers three questions about the hosting environment
//! and nothing else. It holds no state of its own: every call goes back to
//! the [`ShellEnvironment`], so a shell that is torn down and rebuilt is
//! observed on the next query.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use bridge_traits::{plugins, ShellEnvironment};
use serde::Serialize;

/// Closed set of platform identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Ios,
    Android,
    Web,
}

impl PlatformId {
    /// Map a raw shell identifier. Anything unrecognised is treated as `Web`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ios" => PlatformId::Ios,
            "android" => PlatformId::Android,
            _ => PlatformId::Web,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformId::Ios => "ios",
            PlatformId::Android => "android",
            PlatformId::Web => "web",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time description of the environment. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFact {
    pub is_native_shell: bool,
    pub platform_id: PlatformId,
    pub available_plugins: BTreeSet<String>,
}

#[derive(Clone)]
pub struct PlatformProbe {
    shell: Arc<dyn ShellEnvironment>,
}

impl fmt::Debug for PlatformProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformProbe").finish_non_exhaustive()
    }
}

impl PlatformProbe {
    pub fn new(shell: Arc<dyn ShellEnvironment>) -> Self {
        Self { shell }
    }

    pub fn is_native(&self) -> bool {
        self.shell.is_native_platform()
    }

    pub fn platform(&self) -> PlatformId {
        PlatformId::parse(&self.shell.platform())
    }

    /// Always `false` outside a native shell, whatever the registry says.
    pub fn is_plugin_available(&self, name: &str) -> bool {
        self.is_native() && self.shell.is_plugin_available(name)
    }

    /// Query every known plugin at once.
    pub fn snapshot(&self) -> PlatformFact {
        let is_native_shell = self.is_native();
        let available_plugins = if is_native_shell {
            plugins::ALL
                .iter()
                .filter(|name| self.shell.is_plugin_available(name))
                .map(|name| name.to_string())
                .collect()
        } else {
            BTreeSet::new()
        };

        PlatformFact {
            is_native_shell,
            platform_id: self.platform(),
            available_plugins,
        }
    }
}
