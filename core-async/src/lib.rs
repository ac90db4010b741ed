//! Runtime-agnostic task helpers for the capability layer.
//!
//! Capability code never talks to an executor directly. Native targets run on
//! Tokio, WebAssembly builds run on the browser event loop through
//! `wasm-bindgen-futures`. Both sides expose the same two entry points:
//!
//! - [`task::spawn_detached`] for fire-and-forget work started from
//!   synchronous listener callbacks
//! - [`runtime::block_on`] for driving a future to completion from sync code
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//!
//! # #[cfg(not(target_arch = "wasm32"))]
//! # core_async::runtime::block_on(async {
//! task::spawn_detached(async {
//!     tracing::debug!("running in the background");
//! });
//! # });
//! ```

pub mod runtime;
pub mod task;

pub use task::spawn_detached;
