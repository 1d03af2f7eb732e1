//! Host wireless service backends.
//!
//! This module provides the D-Bus backed implementation of
//! [`WifiService`](crate::WifiService).

pub(crate) mod wifi;
