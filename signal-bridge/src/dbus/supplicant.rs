//! wpa_supplicant proxies.
//!
//! wpa_supplicant is the component that actually talks to the driver, and
//! its `SignalPoll` method returns the current RSSI in dBm.

use std::collections::HashMap;
use zbus::{Result, proxy};
use zvariant::{OwnedObjectPath, OwnedValue};

/// Proxy for the root wpa_supplicant object.
#[proxy(
    interface = "fi.w1.wpa_supplicant1",
    default_service = "fi.w1.wpa_supplicant1",
    default_path = "/fi/w1/wpa_supplicant1"
)]
pub trait Supplicant {
    /// Returns the object path of the interface named `ifname`.
    ///
    /// Fails with `fi.w1.wpa_supplicant1.InterfaceUnknown` when wpa_supplicant
    /// does not manage that interface.
    fn get_interface(&self, ifname: &str) -> Result<OwnedObjectPath>;
}

/// Proxy for a wpa_supplicant network interface.
#[proxy(
    interface = "fi.w1.wpa_supplicant1.Interface",
    default_service = "fi.w1.wpa_supplicant1"
)]
pub trait SupplicantInterface {
    /// Polls the driver for current signal information.
    ///
    /// The reply holds `rssi` (int32, dBm), `linkspeed` (int32, Mbit/s),
    /// `noise` (int32) and `frequency` (uint32, MHz), among others.
    fn signal_poll(&self) -> Result<HashMap<String, OwnedValue>>;
}
