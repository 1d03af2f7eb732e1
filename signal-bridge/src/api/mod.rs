//! Public API module.
//!
//! This module contains the user-facing API for the `signal-bridge` crate.

pub mod channel;
pub mod codec;
pub mod models;
pub mod service;
pub mod signal_bridge;
