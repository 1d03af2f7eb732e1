use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::types::constants::channel;

/// A single named request sent over the channel.
///
/// Method calls are immutable once built. The `arguments` payload is opaque to
/// the dispatcher and is handed to the matched handler untouched.
///
/// # Examples
///
/// ```rust
/// use signal_bridge::MethodCall;
///
/// let call = MethodCall::new("getWifiRssiDbm");
/// assert_eq!(call.name(), "getWifiRssiDbm");
/// assert!(call.arguments().is_none());
///
/// let with_args = MethodCall::new("getBatteryLevel")
///     .with_arguments(serde_json::json!({ "unit": "percent" }));
/// assert!(with_args.arguments().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    name: String,
    arguments: Option<serde_json::Value>,
}

impl MethodCall {
    /// Creates a call to `name` without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    /// Attaches an arguments payload to the call.
    #[must_use]
    pub fn with_arguments(mut self, arguments: serde_json::Value) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// The requested method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opaque arguments payload, if any.
    pub fn arguments(&self) -> Option<&serde_json::Value> {
        self.arguments.as_ref()
    }
}

/// The terminal result of a [`MethodCall`].
///
/// Exactly one outcome is produced per call and handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Signal strength in dBm. Conventionally within -127..=0, but the host
    /// platform is the source of truth and no bounds are enforced here.
    Success(i32),
    /// A structured failure. `message` may be empty.
    Failure { code: String, message: String },
    /// No handler is registered for the requested method.
    NotImplemented,
}

impl Outcome {
    /// Builds a failure carrying the channel's error code.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            code: channel::ERROR_CODE.to_string(),
            message: message.into(),
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns `true` for [`Outcome::NotImplemented`].
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(dbm) => write!(f, "{dbm} dBm"),
            Self::Failure { code, message } if message.is_empty() => write!(f, "error {code}"),
            Self::Failure { code, message } => write!(f, "error {code}: {message}"),
            Self::NotImplemented => write!(f, "not implemented"),
        }
    }
}

/// Information about the active wireless connection.
///
/// Mirrors what the host's wireless service reports for the interface
/// currently associated with an access point. Only `rssi` is consumed by
/// the signal handler; the rest is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Interface name (e.g. "wlan0").
    pub interface: String,
    /// SSID of the associated network, when it decodes as UTF-8.
    pub ssid: Option<String>,
    /// BSSID (MAC address) of the associated access point.
    pub bssid: Option<String>,
    /// Received signal strength in dBm.
    pub rssi: i32,
    /// Operating frequency in MHz.
    pub frequency: Option<u32>,
    /// Current link speed in Mbit/s.
    pub link_speed: Option<u32>,
}

/// Configuration for a [`SignalBridge`](crate::SignalBridge).
///
/// # Examples
///
/// ```rust
/// use signal_bridge::BridgeConfig;
///
/// // Defaults: the standard channel name, first associated Wi-Fi device
/// let config = BridgeConfig::default();
///
/// // Pin the lookup to one interface
/// let pinned = BridgeConfig::new().with_interface("wlp3s0");
/// assert_eq!(pinned.interface.as_deref(), Some("wlp3s0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Name of the channel the bridge answers on.
    pub channel_name: String,
    /// Restrict the signal lookup to this interface.
    pub interface: Option<String>,
}

impl BridgeConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the channel name.
    #[must_use]
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    /// Restricts the lookup to a single wireless interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }
}

impl Default for BridgeConfig {
    /// Defaults:
    /// - `channel_name`: `"com.example.gesture_inject/signal"`
    /// - `interface`: `None` (first Wi-Fi device with an active access point)
    fn default() -> Self {
        Self {
            channel_name: channel::NAME.to_string(),
            interface: None,
        }
    }
}

/// Faults raised while querying the host's wireless service.
///
/// The `Display` text is what ends up in the `message` of a failure outcome.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A D-Bus call failed.
    #[error("{context}: {source}")]
    Dbus {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// The wireless service is not running or does not know the interface.
    #[error("wireless service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The caller is not allowed to query the wireless service.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The service answered, but the reply lacked an expected field.
    #[error("malformed reply from {service}: {detail}")]
    MalformedReply {
        service: &'static str,
        detail: String,
    },

    /// Any other platform fault, described verbatim.
    #[error("{0}")]
    Other(String),
}

/// Errors produced while framing method calls and outcomes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload is not valid JSON or does not match the call shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but is not a recognised envelope.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),
}
