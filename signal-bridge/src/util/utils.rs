//! Utility functions for D-Bus replies and fault translation.
//!
//! Provides helpers for decoding SSIDs, pulling the signal fields out of a
//! `SignalPoll` reply, classifying D-Bus errors into platform faults and
//! describing caught panics.

use log::warn;
use std::any::Any;
use std::collections::HashMap;
use std::str;
use zbus::DBusError;
use zvariant::OwnedValue;

use crate::api::models::PlatformError;
use crate::types::constants::{dbus_error, signal_poll};
use crate::Result;

/// Decode SSID bytes, returning `None` if empty or invalid UTF-8.
pub(crate) fn decode_ssid(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    match str::from_utf8(bytes) {
        Ok(s) => Some(s.to_owned()),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID: {e}");
            None
        }
    }
}

/// Signal fields extracted from a wpa_supplicant `SignalPoll` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SignalSample {
    pub rssi: i32,
    pub link_speed: Option<u32>,
    pub frequency: Option<u32>,
}

/// Extracts the RSSI (and, best effort, link speed and frequency) from a
/// `SignalPoll` reply.
///
/// A reply without an `rssi` entry, or with one that is not an `int32`, is
/// a malformed reply rather than "no connection".
pub(crate) fn signal_from_poll(mut reply: HashMap<String, OwnedValue>) -> Result<SignalSample> {
    let rssi = reply
        .remove(signal_poll::RSSI)
        .ok_or_else(|| PlatformError::MalformedReply {
            service: "wpa_supplicant",
            detail: "SignalPoll reply has no rssi".to_string(),
        })
        .and_then(|v| {
            i32::try_from(v).map_err(|e| PlatformError::MalformedReply {
                service: "wpa_supplicant",
                detail: format!("rssi is not an int32: {e}"),
            })
        })?;

    let link_speed = reply
        .remove(signal_poll::LINK_SPEED)
        .and_then(|v| i32::try_from(v).ok())
        .and_then(|v| u32::try_from(v).ok());
    let frequency = reply
        .remove(signal_poll::FREQUENCY)
        .and_then(|v| u32::try_from(v).ok());

    Ok(SignalSample {
        rssi,
        link_speed,
        frequency,
    })
}

/// Maps a well-known D-Bus error name onto a dedicated platform fault.
///
/// Returns `None` for names without a dedicated mapping.
pub(crate) fn classify_error_name(name: &str, description: &str) -> Option<PlatformError> {
    match name {
        dbus_error::ACCESS_DENIED => Some(PlatformError::PermissionDenied(description.to_string())),
        dbus_error::SERVICE_UNKNOWN
        | dbus_error::NAME_HAS_NO_OWNER
        | dbus_error::WPAS_IFACE_UNKNOWN => {
            Some(PlatformError::ServiceUnavailable(description.to_string()))
        }
        _ => None,
    }
}

/// Converts a D-Bus error into a [`PlatformError`], attaching `context` when
/// the error has no dedicated mapping.
pub(crate) fn platform_error(context: impl Into<String>, e: zbus::Error) -> PlatformError {
    let classified = match &e {
        zbus::Error::MethodError(name, description, _) => {
            classify_error_name(name.as_str(), description.as_deref().unwrap_or_default())
        }
        zbus::Error::FDO(fdo) => {
            let fdo: &zbus::fdo::Error = fdo;
            classify_error_name(
                DBusError::name(fdo).as_str(),
                DBusError::description(fdo).unwrap_or_default(),
            )
        }
        _ => None,
    };

    classified.unwrap_or_else(|| PlatformError::Dbus {
        context: context.into(),
        source: e,
    })
}

/// Describes a panic payload caught at the dispatch boundary.
///
/// Panics raised with a string message yield that message; anything else
/// yields an empty description.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

/// Macro to convert Result to Option with error logging.
/// Usage: `try_log!(result, "context message")`
#[macro_export]
macro_rules! try_log {
    ($result:expr, $context:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}: {:?}", $context, e);
                return None;
            }
        }
    };
}
