//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the capability layer:
//! - Logging and tracing setup
//! - Configuration (`CapabilityConfig`) with fail-fast validation
//! - Lazy native plugin slots
//!
//! ## Overview
//!
//! Capabilities never construct their own bridges. Hosts describe the
//! environment once in a [`CapabilityConfig`](config::CapabilityConfig) and the
//! capability crate reads everything it needs from there.

pub mod config;
pub mod error;
pub mod logging;
pub mod plugins;

pub use config::{CapabilityConfig, CapabilityConfigBuilder, InitSettings};
pub use error::{Error, Result};
pub use plugins::{NativePlugins, PluginSlot};
