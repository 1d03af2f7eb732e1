//! The port through which the signal handler reaches the host platform.

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::models::ConnectionInfo;
use crate::Result;

/// A host wireless-connectivity service.
///
/// Implementations query the platform once per call and must not cache:
/// every `connection_info` reflects the platform's state at call time.
///
/// - `Ok(Some(info))`: there is an active connection.
/// - `Ok(None)`: the service answered but has no active connection.
/// - `Err(_)`: the query itself failed.
///
/// # Implementing
///
/// ```rust
/// use async_trait::async_trait;
/// use signal_bridge::{ConnectionInfo, WifiService};
///
/// struct Disconnected;
///
/// #[async_trait]
/// impl WifiService for Disconnected {
///     async fn connection_info(&self) -> signal_bridge::Result<Option<ConnectionInfo>> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait WifiService: Send + Sync {
    /// Returns information about the active wireless connection.
    async fn connection_info(&self) -> Result<Option<ConnectionInfo>>;
}

#[async_trait]
impl<T: WifiService + ?Sized> WifiService for Arc<T> {
    async fn connection_info(&self) -> Result<Option<ConnectionInfo>> {
        (**self).connection_info().await
    }
}

#[async_trait]
impl<T: WifiService + ?Sized> WifiService for Box<T> {
    async fn connection_info(&self) -> Result<Option<ConnectionInfo>> {
        (**self).connection_info().await
    }
}
