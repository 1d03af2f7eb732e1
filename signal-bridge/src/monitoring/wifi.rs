//! Active Wi-Fi connection lookup over the system D-Bus.
//!
//! NetworkManager identifies the Wi-Fi device that is associated with an
//! access point; wpa_supplicant then reports the signal strength of that
//! interface in dBm.

use async_trait::async_trait;
use log::debug;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::api::models::ConnectionInfo;
use crate::api::service::WifiService;
use crate::dbus::{
    NMAccessPointProxy, NMDeviceProxy, NMProxy, NMWirelessProxy, SupplicantInterfaceProxy,
    SupplicantProxy,
};
use crate::try_log;
use crate::types::constants::{NO_OBJECT_PATH, device_type};
use crate::util::utils::{SignalSample, decode_ssid, platform_error, signal_from_poll};
use crate::Result;

/// A [`WifiService`] backed by NetworkManager and wpa_supplicant.
///
/// Each query walks NetworkManager's devices, picks the first Wi-Fi device
/// with an active access point (or the configured interface), and polls
/// wpa_supplicant for that interface's RSSI.
///
/// # Examples
///
/// ```no_run
/// use signal_bridge::{NetworkManagerWifi, WifiService};
///
/// # async fn example() -> signal_bridge::Result<()> {
/// let wifi = NetworkManagerWifi::new();
/// match wifi.connection_info().await? {
///     Some(info) => println!("{}: {} dBm", info.interface, info.rssi),
///     None => println!("not connected"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkManagerWifi {
    conn: Option<Connection>,
    interface: Option<String>,
}

impl NetworkManagerWifi {
    /// Creates a backend that connects to the system bus on every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that reuses an existing bus connection.
    pub fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Some(conn),
            interface: None,
        }
    }

    /// Restricts the lookup to a single interface.
    #[must_use]
    pub fn with_interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }

    /// The interface the lookup is restricted to, if any.
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    async fn connection(&self) -> Result<Connection> {
        match &self.conn {
            Some(conn) => Ok(conn.clone()),
            None => Connection::system()
                .await
                .map_err(|e| platform_error("failed to connect to the system bus", e)),
        }
    }
}

#[async_trait]
impl WifiService for NetworkManagerWifi {
    async fn connection_info(&self) -> Result<Option<ConnectionInfo>> {
        let conn = self.connection().await?;

        let Some(active) = active_wifi_device(&conn, self.interface.as_deref()).await? else {
            debug!("No Wi-Fi device is associated with an access point");
            return Ok(None);
        };

        let sample = poll_signal(&conn, &active.interface).await?;
        let details = access_point_details(&conn, active.access_point)
            .await
            .unwrap_or_default();

        Ok(Some(merge_connection_info(active.interface, sample, details)))
    }
}

/// Combines the polled signal with the access point's descriptive fields.
///
/// The frequency wpa_supplicant reports wins over the access point's.
fn merge_connection_info(
    interface: String,
    sample: SignalSample,
    details: AccessPointDetails,
) -> ConnectionInfo {
    ConnectionInfo {
        interface,
        ssid: details.ssid,
        bssid: details.bssid,
        rssi: sample.rssi,
        frequency: sample.frequency.or(details.frequency),
        link_speed: sample.link_speed,
    }
}

/// A Wi-Fi device NetworkManager reports as associated.
struct ActiveDevice {
    interface: String,
    access_point: OwnedObjectPath,
}

/// Descriptive fields of the active access point.
#[derive(Debug, Default)]
struct AccessPointDetails {
    ssid: Option<String>,
    bssid: Option<String>,
    frequency: Option<u32>,
}

/// Returns the first Wi-Fi device with an active access point.
///
/// When `only` is set, devices with any other interface name are skipped.
/// Returns `None` if no matching device is associated.
async fn active_wifi_device(conn: &Connection, only: Option<&str>) -> Result<Option<ActiveDevice>> {
    let nm = NMProxy::new(conn)
        .await
        .map_err(|e| platform_error("failed to create NetworkManager proxy", e))?;
    let devices = nm
        .get_devices()
        .await
        .map_err(|e| platform_error("failed to get device paths from NetworkManager", e))?;

    for dp in devices {
        let dev = NMDeviceProxy::builder(conn)
            .path(dp.clone())
            .map_err(|e| platform_error("failed to create device proxy builder", e))?
            .build()
            .await
            .map_err(|e| platform_error("failed to build device proxy", e))?;

        let dev_type = dev.device_type().await.map_err(|e| {
            platform_error(format!("failed to get device type for {}", dp.as_str()), e)
        })?;
        if dev_type != device_type::WIFI {
            continue;
        }

        let interface = dev.interface().await.map_err(|e| {
            platform_error(format!("failed to get interface name for {}", dp.as_str()), e)
        })?;
        if only.is_some_and(|wanted| wanted != interface) {
            continue;
        }

        let wifi = NMWirelessProxy::builder(conn)
            .path(dp.clone())
            .map_err(|e| platform_error("failed to create wireless proxy builder", e))?
            .build()
            .await
            .map_err(|e| platform_error("failed to build wireless proxy", e))?;

        let access_point = wifi.active_access_point().await.map_err(|e| {
            platform_error(format!("failed to get active access point for {interface}"), e)
        })?;
        if access_point.as_str() == NO_OBJECT_PATH {
            continue;
        }

        debug!("Active Wi-Fi device: {interface} ({})", access_point.as_str());
        return Ok(Some(ActiveDevice {
            interface,
            access_point,
        }));
    }

    Ok(None)
}

/// Polls wpa_supplicant for the signal of `interface`.
async fn poll_signal(conn: &Connection, interface: &str) -> Result<SignalSample> {
    let supplicant = SupplicantProxy::new(conn)
        .await
        .map_err(|e| platform_error("failed to create wpa_supplicant proxy", e))?;
    let path = supplicant.get_interface(interface).await.map_err(|e| {
        platform_error(format!("wpa_supplicant does not manage {interface}"), e)
    })?;

    let iface = SupplicantInterfaceProxy::builder(conn)
        .path(path)
        .map_err(|e| platform_error("failed to create wpa_supplicant interface proxy builder", e))?
        .build()
        .await
        .map_err(|e| platform_error("failed to build wpa_supplicant interface proxy", e))?;

    let reply = iface
        .signal_poll()
        .await
        .map_err(|e| platform_error(format!("failed to poll signal on {interface}"), e))?;

    signal_from_poll(reply)
}

/// Reads SSID, BSSID and frequency of the active access point.
///
/// These fields are descriptive only, so failures are logged and dropped
/// instead of failing the query.
async fn access_point_details(conn: &Connection, path: OwnedObjectPath) -> Option<AccessPointDetails> {
    let ap_builder = try_log!(
        NMAccessPointProxy::builder(conn).path(path),
        "Failed to create access point proxy builder"
    );
    let ap = try_log!(ap_builder.build().await, "Failed to build access point proxy");

    let ssid_bytes = try_log!(ap.ssid().await, "Failed to get SSID bytes");
    let bssid = ap.hw_address().await.ok();
    let frequency = ap.frequency().await.ok();

    Some(AccessPointDetails {
        ssid: decode_ssid(&ssid_bytes),
        bssid,
        frequency,
    })
}
