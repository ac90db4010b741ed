//! Capabilities in a plain browser tab.
//!
//! Native plugin bindings are configured but the shell is absent, so not a
//! single bridge call may happen.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bridge_traits::{
    ConnectivityEvent, DeviceMotion, MotionSupport, PartialAcceleration, PermissionState,
    WebStorage,
};
use core_capabilities::{
    CacheEnvelope, CapabilityError, InitReport, InitState, MotionSample, PlatformId,
};
use serde::{Deserialize, Serialize};

use common::{FakeBrowser, Harness, SAFARI_IPHONE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Feed {
    items: Vec<String>,
}

#[tokio::test]
async fn test_browser_path_makes_no_bridge_calls() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();

    assert!(!capabilities.probe().is_native());
    assert_eq!(capabilities.probe().platform(), PlatformId::Web);

    assert_eq!(capabilities.initialize().await, InitReport::BrowserOnly);
    assert_eq!(capabilities.init_state(), InitState::Done);

    capabilities.device().fetch_device_info().await.unwrap();
    capabilities.network().watch_network().await.unwrap();
    capabilities.storage().set_item("k", "v").await.unwrap();
    capabilities.storage().get_item("k").await.unwrap();
    capabilities.notifications().request_permission().await.unwrap();
    assert!(capabilities.motion().request_permission().await);
    capabilities
        .motion()
        .start_listening(Arc::new(|_: MotionSample| {}))
        .await
        .unwrap();

    assert!(harness.calls.calls().is_empty(), "bridge calls: {:?}", harness.calls.calls());
}

#[tokio::test]
async fn test_web_device_info_from_navigator() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();

    let info = capabilities.device().fetch_device_info().await.unwrap();

    assert_eq!(info.platform, "web");
    assert_eq!(info.operating_system, "ios");
    assert_eq!(info.model, "iPhone");
    assert_eq!(info.os_version, SAFARI_IPHONE);
    assert_eq!(info.manufacturer, "Unknown");
    assert!(!info.is_virtual);
    assert!(info.battery_level.is_none());
    assert_eq!(capabilities.device().info(), Some(info));
}

#[tokio::test]
async fn test_offline_event_keeps_connection_type() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();
    let network = capabilities.network();

    assert!(network.status().connected);
    network.watch_network().await.unwrap();
    network.watch_network().await.unwrap();
    assert_eq!(harness.browser.connectivity.active(), 1);

    let before = network.status().connection_type;
    harness.browser.connectivity.emit(ConnectivityEvent::Offline);
    assert!(!network.status().connected);
    assert_eq!(network.status().connection_type, before);

    harness.browser.connectivity.emit(ConnectivityEvent::Online);
    assert!(network.status().connected);
}

#[tokio::test]
async fn test_offline_cache_round_trip() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();
    let storage = capabilities.storage();

    let feed = Feed {
        items: vec!["a".to_string(), "b".to_string()],
    };
    storage.cache_for_offline("feed", &feed).await.unwrap();

    let cached: CacheEnvelope<Feed> = storage.get_cached("feed").await.unwrap().unwrap();
    assert_eq!(cached.data, feed);
    assert_eq!(cached.timestamp, 1_700_000_000_000);
    assert!(harness.storage.get_item("offline_feed").unwrap().is_some());
}

#[tokio::test]
async fn test_unset_and_corrupt_cache_entries_are_none() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();

    let unset: Option<CacheEnvelope<Feed>> =
        capabilities.storage().get_cached("feed").await.unwrap();
    assert!(unset.is_none());

    harness.storage.set_item("offline_feed", "][").unwrap();
    let corrupt: Option<CacheEnvelope<Feed>> =
        capabilities.storage().get_cached("feed").await.unwrap();
    assert!(corrupt.is_none());

    let plain: Option<Feed> = capabilities.storage().get_json("missing").await.unwrap();
    assert!(plain.is_none());
}

#[tokio::test]
async fn test_motion_denied_blocks_listening() {
    let mut browser = FakeBrowser::new(SAFARI_IPHONE);
    browser.motion_support = MotionSupport::ExplicitConsent;
    browser.motion_answer = "denied";
    let harness = Harness::browser(browser);
    let capabilities = harness.capabilities();

    assert!(!capabilities.motion().request_permission().await);
    assert_eq!(capabilities.motion().permission(), PermissionState::Denied);

    let result = capabilities
        .motion()
        .start_listening(Arc::new(|_: MotionSample| {}))
        .await;
    assert!(matches!(result, Err(CapabilityError::PermissionDenied(_))));
    assert_eq!(harness.browser.motion.active(), 0);
}

#[tokio::test]
async fn test_second_motion_subscription_replaces_first() {
    let harness = Harness::browser(FakeBrowser::new(SAFARI_IPHONE));
    let capabilities = harness.capabilities();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    capabilities
        .motion()
        .start_listening(Arc::new(move |_: MotionSample| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .await
        .unwrap();
    let counter = Arc::clone(&second);
    capabilities
        .motion()
        .start_listening(Arc::new(move |_: MotionSample| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .await
        .unwrap();

    harness.browser.motion.emit(DeviceMotion {
        acceleration_including_gravity: Some(PartialAcceleration {
            x: Some(0.1),
            y: None,
            z: Some(9.8),
        }),
    });

    assert_eq!(harness.browser.motion.active(), 1);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    capabilities.motion().stop_listening().await.unwrap();
    assert_eq!(harness.browser.motion.active(), 0);
    assert!(!capabilities.motion().is_listening());
}

#[tokio::test]
async fn test_shell_appearing_later_is_observed() {
    let harness = Harness::native("android");
    harness.shell.native.store(false, Ordering::SeqCst);
    let capabilities = harness.capabilities();

    capabilities.storage().set_item("theme", "dark").await.unwrap();
    assert!(harness.calls.calls().is_empty());

    harness.shell.native.store(true, Ordering::SeqCst);
    capabilities.storage().set_item("theme", "dark").await.unwrap();
    assert_eq!(harness.calls.count("Preferences.set"), 1);
    assert_eq!(
        harness.preferences.values.lock().get("theme").map(String::as_str),
        Some("dark")
    );
}
