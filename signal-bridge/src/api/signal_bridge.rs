use log::warn;

use crate::api::channel::MethodChannel;
use crate::api::codec::{decode_method_call, encode_outcome};
use crate::api::models::{BridgeConfig, CodecError, MethodCall, Outcome};
use crate::api::service::WifiService;
use crate::core::signal::signal_channel;
use crate::monitoring::wifi::NetworkManagerWifi;
use crate::types::constants::channel;

/// High-level entry point: the signal channel wired to a wireless service.
///
/// # Creating an Instance
///
/// ```no_run
/// use signal_bridge::{Outcome, SignalBridge};
///
/// # async fn example() {
/// let bridge = SignalBridge::new();
///
/// match bridge.wifi_rssi_dbm().await {
///     Outcome::Success(dbm) => println!("{dbm} dBm"),
///     other => eprintln!("{other}"),
/// }
/// # }
/// ```
///
/// ## With a custom service
///
/// ```rust
/// use async_trait::async_trait;
/// use signal_bridge::{BridgeConfig, ConnectionInfo, MethodCall, Outcome, SignalBridge, WifiService};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl WifiService for Fixed {
///     async fn connection_info(&self) -> signal_bridge::Result<Option<ConnectionInfo>> {
///         Ok(Some(ConnectionInfo {
///             interface: "wlan0".into(),
///             ssid: None,
///             bssid: None,
///             rssi: -48,
///             frequency: None,
///             link_speed: None,
///         }))
///     }
/// }
///
/// # async fn example() {
/// let bridge = SignalBridge::with_service(BridgeConfig::default(), Fixed);
/// let outcome = bridge.dispatch(MethodCall::new("getWifiRssiDbm")).await;
/// assert_eq!(outcome, Outcome::Success(-48));
/// # }
/// ```
///
/// # Thread Safety
///
/// Dispatch keeps no state between calls. Concurrent calls each query the
/// wireless service independently; the bridge takes no locks of its own.
#[derive(Debug, Clone)]
pub struct SignalBridge {
    channel: MethodChannel,
}

impl SignalBridge {
    /// Creates a bridge on the default channel, backed by NetworkManager and
    /// wpa_supplicant on the system bus.
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Creates a D-Bus backed bridge with custom configuration.
    pub fn with_config(config: BridgeConfig) -> Self {
        let service = NetworkManagerWifi::new().with_interface(config.interface.clone());
        Self::with_service(config, service)
    }

    /// Creates a bridge answering from an arbitrary wireless service.
    ///
    /// `config.interface` is only meaningful to the D-Bus backend and is
    /// ignored here.
    pub fn with_service<S>(config: BridgeConfig, service: S) -> Self
    where
        S: WifiService + 'static,
    {
        Self {
            channel: signal_channel(config.channel_name, service),
        }
    }

    /// The underlying channel.
    pub fn channel(&self) -> &MethodChannel {
        &self.channel
    }

    /// Dispatches a call on the channel.
    pub async fn dispatch(&self, call: MethodCall) -> Outcome {
        self.channel.dispatch(call).await
    }

    /// Shorthand for dispatching `getWifiRssiDbm`.
    pub async fn wifi_rssi_dbm(&self) -> Outcome {
        self.dispatch(MethodCall::new(channel::GET_WIFI_RSSI_DBM)).await
    }

    /// Decodes an encoded method call, dispatches it and encodes the reply.
    ///
    /// A payload that does not decode is answered with an error envelope
    /// instead of being dropped, so every message gets exactly one reply.
    pub async fn handle_message(&self, message: &[u8]) -> Result<Vec<u8>, CodecError> {
        let outcome = match decode_method_call(message) {
            Ok(call) => self.dispatch(call).await,
            Err(e) => {
                warn!("{}: undecodable method call: {e}", self.channel.name());
                Outcome::failure(e.to_string())
            }
        };
        encode_outcome(&outcome)
    }
}

impl Default for SignalBridge {
    fn default() -> Self {
        Self::new()
    }
}
