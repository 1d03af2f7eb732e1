//! Main NetworkManager proxy.

use zbus::proxy;

/// Proxy for the main NetworkManager interface.
///
/// Only device enumeration is needed to locate the active Wi-Fi device.
#[proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
pub trait NM {
    /// Returns paths to all network devices.
    fn get_devices(&self) -> zbus::Result<Vec<zvariant::OwnedObjectPath>>;
}
