//! Tests for the signal channel against a fake wireless service.
//!
//! The fake stands in for NetworkManager/wpa_supplicant so that every
//! platform answer (connected, disconnected, fault) can be staged.

use async_trait::async_trait;
use signal_bridge::{
    BridgeConfig, CHANNEL_NAME, ConnectionInfo, ERROR_CODE, GET_WIFI_RSSI_DBM, MethodCall,
    NO_SIGNAL_DBM, Outcome, PlatformError, SignalBridge, WifiService, get_wifi_rssi_dbm,
    signal_channel,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Platform {
    Connected(i32),
    Disconnected,
    Fault(String),
}

struct FakeWifi {
    platform: Mutex<Platform>,
    queries: AtomicUsize,
}

impl FakeWifi {
    fn new(platform: Platform) -> Arc<Self> {
        Arc::new(Self {
            platform: Mutex::new(platform),
            queries: AtomicUsize::new(0),
        })
    }

    fn set(&self, platform: Platform) {
        *self.platform.lock().unwrap() = platform;
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WifiService for FakeWifi {
    async fn connection_info(&self) -> signal_bridge::Result<Option<ConnectionInfo>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let platform = self.platform.lock().unwrap().clone();
        match platform {
            Platform::Connected(rssi) => Ok(Some(ConnectionInfo {
                interface: "wlan0".to_string(),
                ssid: Some("HomeNetwork".to_string()),
                bssid: Some("AA:BB:CC:DD:EE:FF".to_string()),
                rssi,
                frequency: Some(2437),
                link_speed: Some(144),
            })),
            Platform::Disconnected => Ok(None),
            Platform::Fault(message) => Err(PlatformError::Other(message)),
        }
    }
}

fn bridge(fake: &Arc<FakeWifi>) -> SignalBridge {
    SignalBridge::with_service(BridgeConfig::default(), Arc::clone(fake))
}

#[tokio::test]
async fn reports_connected_signal() {
    let fake = FakeWifi::new(Platform::Connected(-55));
    let outcome = bridge(&fake).dispatch(MethodCall::new("getWifiRssiDbm")).await;
    assert_eq!(outcome, Outcome::Success(-55));
}

#[tokio::test]
async fn reports_sentinel_when_disconnected() {
    let fake = FakeWifi::new(Platform::Disconnected);
    let outcome = bridge(&fake).dispatch(MethodCall::new("getWifiRssiDbm")).await;
    assert_eq!(outcome, Outcome::Success(-127));
    assert_eq!(NO_SIGNAL_DBM, -127);
}

#[tokio::test]
async fn reports_platform_fault_as_err() {
    let fake = FakeWifi::new(Platform::Fault("permission denied".to_string()));
    let outcome = bridge(&fake).dispatch(MethodCall::new("getWifiRssiDbm")).await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            code: "ERR".to_string(),
            message: "permission denied".to_string(),
        }
    );
}

#[tokio::test]
async fn empty_fault_description_gives_empty_message() {
    let fake = FakeWifi::new(Platform::Fault(String::new()));
    let outcome = bridge(&fake).wifi_rssi_dbm().await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            code: ERROR_CODE.to_string(),
            message: String::new(),
        }
    );
}

#[tokio::test]
async fn unregistered_method_is_not_implemented() {
    let fake = FakeWifi::new(Platform::Connected(-40));
    let outcome = bridge(&fake).dispatch(MethodCall::new("getBatteryLevel")).await;
    assert_eq!(outcome, Outcome::NotImplemented);
    assert_eq!(fake.queries(), 0);
}

#[tokio::test]
async fn unknown_names_never_query_the_platform() {
    let fake = FakeWifi::new(Platform::Connected(-40));
    let bridge = bridge(&fake);

    for name in [
        "",
        "getwifirssidbm",
        "GetWifiRssiDbm",
        "getWifiRssiDbm ",
        " getWifiRssiDbm",
        "getWifiRssi",
        "com.example.gesture_inject/signal",
    ] {
        let outcome = bridge.dispatch(MethodCall::new(name)).await;
        assert_eq!(outcome, Outcome::NotImplemented, "method {name:?}");
    }
    assert_eq!(fake.queries(), 0);
}

#[tokio::test]
async fn signal_values_pass_through_untransformed() {
    let fake = FakeWifi::new(Platform::Disconnected);
    let bridge = bridge(&fake);

    for rssi in [i32::MIN, -200, -127, -90, -30, 0, 12, i32::MAX] {
        fake.set(Platform::Connected(rssi));
        assert_eq!(bridge.wifi_rssi_dbm().await, Outcome::Success(rssi));
    }
}

#[tokio::test]
async fn explicit_floor_reading_matches_sentinel() {
    let fake = FakeWifi::new(Platform::Connected(-127));
    let connected = bridge(&fake).wifi_rssi_dbm().await;
    fake.set(Platform::Disconnected);
    let disconnected = bridge(&fake).wifi_rssi_dbm().await;
    assert_eq!(connected, disconnected);
}

#[tokio::test]
async fn arguments_are_ignored() {
    let fake = FakeWifi::new(Platform::Connected(-61));
    let call = MethodCall::new(GET_WIFI_RSSI_DBM).with_arguments(serde_json::json!({"iface": "wlan1"}));
    assert_eq!(bridge(&fake).dispatch(call).await, Outcome::Success(-61));
}

#[tokio::test]
async fn one_outcome_and_one_query_per_call() {
    let fake = FakeWifi::new(Platform::Connected(-70));
    let bridge = bridge(&fake);

    let mut outcomes = Vec::new();
    for _ in 0..25 {
        outcomes.push(bridge.wifi_rssi_dbm().await);
    }
    assert_eq!(outcomes.len(), 25);
    assert_eq!(fake.queries(), 25);
}

#[tokio::test]
async fn repeated_calls_are_idempotent() {
    for platform in [
        Platform::Connected(-48),
        Platform::Disconnected,
        Platform::Fault("device busy".to_string()),
    ] {
        let fake = FakeWifi::new(platform);
        let bridge = bridge(&fake);
        let first = bridge.wifi_rssi_dbm().await;
        let second = bridge.wifi_rssi_dbm().await;
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn every_call_requeries_the_platform() {
    let fake = FakeWifi::new(Platform::Connected(-50));
    let bridge = bridge(&fake);

    assert_eq!(bridge.wifi_rssi_dbm().await, Outcome::Success(-50));
    fake.set(Platform::Connected(-80));
    assert_eq!(bridge.wifi_rssi_dbm().await, Outcome::Success(-80));
    fake.set(Platform::Fault("radio off".to_string()));
    assert_eq!(bridge.wifi_rssi_dbm().await, Outcome::failure("radio off"));
    fake.set(Platform::Disconnected);
    assert_eq!(bridge.wifi_rssi_dbm().await, Outcome::Success(NO_SIGNAL_DBM));
}

#[tokio::test]
async fn concurrent_calls_each_get_an_outcome() {
    let fake = FakeWifi::new(Platform::Connected(-66));
    let bridge = Arc::new(bridge(&fake));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let bridge = Arc::clone(&bridge);
            tokio::spawn(async move { bridge.wifi_rssi_dbm().await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), Outcome::Success(-66));
    }
    assert_eq!(fake.queries(), 16);
}

#[tokio::test]
async fn handler_can_be_called_directly() {
    let fake = FakeWifi::new(Platform::Connected(-72));
    assert_eq!(get_wifi_rssi_dbm(fake.as_ref()).await, Outcome::Success(-72));

    fake.set(Platform::Disconnected);
    assert_eq!(get_wifi_rssi_dbm(&fake).await, Outcome::Success(-127));
}

#[test]
fn default_channel_layout() {
    let fake = FakeWifi::new(Platform::Disconnected);
    let channel = signal_channel(CHANNEL_NAME, fake);

    assert_eq!(channel.name(), "com.example.gesture_inject/signal");
    assert_eq!(channel.methods().collect::<Vec<_>>(), ["getWifiRssiDbm"]);
}

#[test]
fn custom_channel_name() {
    let fake = FakeWifi::new(Platform::Disconnected);
    let bridge = SignalBridge::with_service(
        BridgeConfig::new().with_channel_name("test/signal"),
        fake,
    );
    assert_eq!(bridge.channel().name(), "test/signal");
}

#[tokio::test]
async fn handle_message_round_trip() {
    let fake = FakeWifi::new(Platform::Connected(-55));
    let bridge = bridge(&fake);

    let reply = bridge
        .handle_message(br#"{"method":"getWifiRssiDbm","args":null}"#)
        .await
        .unwrap();
    assert_eq!(reply, b"[-55]");

    let reply = bridge
        .handle_message(br#"{"method":"getBatteryLevel"}"#)
        .await
        .unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn handle_message_answers_garbage_with_error_envelope() {
    let fake = FakeWifi::new(Platform::Connected(-55));
    let reply = bridge(&fake).handle_message(b"{oops").await.unwrap();

    let outcome = signal_bridge::codec::decode_outcome(&reply).unwrap();
    assert!(matches!(outcome, Outcome::Failure { ref code, .. } if code == "ERR"));
    assert_eq!(fake.queries(), 0);
}
