//! Constants for the signal channel and the D-Bus services it queries.
//!
//! These correspond to the fixed channel contract (name, method, error code)
//! and the numeric codes and dictionary keys used by NetworkManager and
//! wpa_supplicant.

/// Channel contract shared with the presentation layer.
pub mod channel {
    /// Name of the channel carrying signal queries.
    pub const NAME: &str = "com.example.gesture_inject/signal";
    /// The single supported method.
    pub const GET_WIFI_RSSI_DBM: &str = "getWifiRssiDbm";
    /// Error code attached to every failure outcome.
    pub const ERROR_CODE: &str = "ERR";
}

/// Signal strength conventions.
pub mod signal {
    /// Reported when there is no active connection: the practical floor of RSSI.
    pub const NO_SIGNAL_DBM: i32 = -127;
}

/// NetworkManager device type constants.
pub mod device_type {
    pub const WIFI: u32 = 2;
}

/// Object path NetworkManager uses for "no object".
pub const NO_OBJECT_PATH: &str = "/";

/// Keys of the dictionary returned by wpa_supplicant's `SignalPoll`.
pub mod signal_poll {
    pub const RSSI: &str = "rssi";
    pub const LINK_SPEED: &str = "linkspeed";
    pub const FREQUENCY: &str = "frequency";
}

/// D-Bus error names that map onto dedicated platform faults.
pub mod dbus_error {
    pub const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";
    pub const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";
    pub const NAME_HAS_NO_OWNER: &str = "org.freedesktop.DBus.Error.NameHasNoOwner";
    pub const WPAS_IFACE_UNKNOWN: &str = "fi.w1.wpa_supplicant1.InterfaceUnknown";
}
