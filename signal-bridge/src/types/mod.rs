//! Type definitions and constants.
//!
//! This module contains the channel contract and D-Bus constants.

pub(crate) mod constants;
