//! D-Bus proxy interfaces for the host wireless services.
//!
//! NetworkManager tells us which Wi-Fi device is associated; wpa_supplicant
//! reports the signal strength of that interface in dBm.

mod access_point;
mod device;
mod main_nm;
mod supplicant;
mod wireless;

pub(crate) use access_point::NMAccessPointProxy;
pub(crate) use device::NMDeviceProxy;
pub(crate) use main_nm::NMProxy;
pub(crate) use supplicant::{SupplicantInterfaceProxy, SupplicantProxy};
pub(crate) use wireless::NMWirelessProxy;
