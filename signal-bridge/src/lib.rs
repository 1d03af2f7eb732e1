//! A method-channel bridge that reports the active Wi-Fi signal strength.
//!
//! The bridge answers one question on demand: what is the received signal
//! strength (RSSI, in dBm) of the active wireless connection? Callers send a
//! [`MethodCall`] by name over a named [`MethodChannel`] and always receive
//! exactly one [`Outcome`]:
//!
//! - `Success(dbm)` for `getWifiRssiDbm`; `-127` when nothing is connected
//! - `Failure { code: "ERR", message }` when the platform query fails
//! - `NotImplemented` for any other method name
//!
//! # Example
//!
//! ```no_run
//! use signal_bridge::{MethodCall, Outcome, SignalBridge};
//!
//! # async fn example() {
//! let bridge = SignalBridge::new();
//!
//! match bridge.dispatch(MethodCall::new("getWifiRssiDbm")).await {
//!     Outcome::Success(dbm) => println!("signal: {dbm} dBm"),
//!     Outcome::Failure { code, message } => eprintln!("{code}: {message}"),
//!     Outcome::NotImplemented => unreachable!(),
//! }
//! # }
//! ```
//!
//! # Platform
//!
//! The default backend, [`NetworkManagerWifi`], locates the associated Wi-Fi
//! device through NetworkManager and reads its RSSI through wpa_supplicant's
//! `SignalPoll`, both over the system D-Bus. Any other source can be plugged
//! in by implementing [`WifiService`].
//!
//! # Wire Format
//!
//! The [`codec`] module frames calls and outcomes as JSON envelopes, and
//! [`SignalBridge::handle_message`] runs a full decode/dispatch/encode cycle.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod core;
mod dbus;
mod monitoring;
mod types;
mod util;

// Public API modules
pub mod api;

// Re-exported public API
pub use api::channel::{MethodChannel, MethodHandler};
pub use api::codec;
pub use api::models::{BridgeConfig, CodecError, ConnectionInfo, MethodCall, Outcome, PlatformError};
pub use api::service::WifiService;
pub use api::signal_bridge::SignalBridge;
pub use crate::core::signal::{WifiRssiHandler, get_wifi_rssi_dbm, signal_channel};
pub use monitoring::wifi::NetworkManagerWifi;

/// Name of the channel carrying signal queries.
pub const CHANNEL_NAME: &str = types::constants::channel::NAME;
/// The single supported method.
pub const GET_WIFI_RSSI_DBM: &str = types::constants::channel::GET_WIFI_RSSI_DBM;
/// Error code carried by every failure outcome.
pub const ERROR_CODE: &str = types::constants::channel::ERROR_CODE;
/// RSSI reported when there is no active connection.
pub const NO_SIGNAL_DBM: i32 = types::constants::signal::NO_SIGNAL_DBM;

/// A specialized `Result` type for wireless service queries.
pub type Result<T> = std::result::Result<T, PlatformError>;
