//! The `getWifiRssiDbm` method.
//!
//! Queries the wireless service once per call and turns the answer into an
//! [`Outcome`]: the reported RSSI, the no-signal sentinel when there is no
//! active connection, or a failure carrying the fault's description.

use async_trait::async_trait;
use log::{debug, warn};

use crate::api::channel::{MethodChannel, MethodHandler};
use crate::api::models::{MethodCall, Outcome};
use crate::api::service::WifiService;
use crate::types::constants::{channel, signal};

/// Queries `service` for the signal strength of the active connection.
///
/// - An active connection yields `Success(rssi)`, untransformed.
/// - No active connection yields `Success(-127)`.
/// - A query fault yields `Failure("ERR", <fault description>)`.
///
/// There is no retry and no caching; each call re-queries the service.
pub async fn get_wifi_rssi_dbm<S>(service: &S) -> Outcome
where
    S: WifiService + ?Sized,
{
    match service.connection_info().await {
        Ok(Some(info)) => {
            debug!("{}: {} dBm", info.interface, info.rssi);
            Outcome::Success(info.rssi)
        }
        Ok(None) => {
            debug!("No active Wi-Fi connection, reporting {} dBm", signal::NO_SIGNAL_DBM);
            Outcome::Success(signal::NO_SIGNAL_DBM)
        }
        Err(e) => {
            warn!("Wi-Fi signal query failed: {e}");
            Outcome::failure(e.to_string())
        }
    }
}

/// [`MethodHandler`] answering `getWifiRssiDbm` from a [`WifiService`].
///
/// Call arguments are ignored.
#[derive(Debug, Clone)]
pub struct WifiRssiHandler<S> {
    service: S,
}

impl<S: WifiService> WifiRssiHandler<S> {
    /// Creates a handler that queries `service` on every call.
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: WifiService> MethodHandler for WifiRssiHandler<S> {
    async fn handle(&self, _call: &MethodCall) -> Outcome {
        get_wifi_rssi_dbm(&self.service).await
    }
}

/// Builds a channel named `name` answering `getWifiRssiDbm` from `service`.
pub fn signal_channel<S>(name: impl Into<String>, service: S) -> MethodChannel
where
    S: WifiService + 'static,
{
    MethodChannel::new(name).with_handler(channel::GET_WIFI_RSSI_DBM, WifiRssiHandler::new(service))
}
