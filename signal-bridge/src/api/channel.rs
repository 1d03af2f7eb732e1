//! Named method channel with name-based dispatch.
//!
//! A [`MethodChannel`] maps method names to handlers. Dispatching a call
//! always yields exactly one [`Outcome`]: the handler's own outcome, a
//! failure if the handler panicked, or [`Outcome::NotImplemented`] when no
//! handler is registered under the call's name.

use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::api::models::{MethodCall, Outcome};
use crate::util::utils::panic_message;

/// Handles calls to one registered method.
///
/// Handlers report every failure through the returned [`Outcome`]. A panic
/// is still caught by the channel, but it is logged as an error.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Answers a single call.
    async fn handle(&self, call: &MethodCall) -> Outcome;
}

/// A named channel routing method calls to registered handlers.
///
/// The handler table is fixed once the channel is built; dispatch keeps no
/// state between calls, so a channel can be shared freely across tasks.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use signal_bridge::{MethodCall, MethodChannel, MethodHandler, Outcome};
///
/// struct Constant(i32);
///
/// #[async_trait]
/// impl MethodHandler for Constant {
///     async fn handle(&self, _call: &MethodCall) -> Outcome {
///         Outcome::Success(self.0)
///     }
/// }
///
/// # async fn example() {
/// let channel = MethodChannel::new("demo/signal").with_handler("getConstant", Constant(-40));
///
/// assert_eq!(channel.dispatch(MethodCall::new("getConstant")).await, Outcome::Success(-40));
/// assert_eq!(channel.dispatch(MethodCall::new("getOther")).await, Outcome::NotImplemented);
/// # }
/// ```
#[derive(Clone)]
pub struct MethodChannel {
    name: String,
    handlers: HashMap<String, Arc<dyn MethodHandler>>,
}

impl MethodChannel {
    /// Creates a channel with no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under `method`, replacing any previous handler.
    #[must_use]
    pub fn with_handler(mut self, method: impl Into<String>, handler: impl MethodHandler + 'static) -> Self {
        let method = method.into();
        if self.handlers.insert(method.clone(), Arc::new(handler)).is_some() {
            warn!("{}: replaced handler for '{method}'", self.name);
        }
        self
    }

    /// The channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of all registered methods, in no particular order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Returns whether a handler is registered under `method`.
    pub fn handles(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Routes `call` to its handler and returns the single resulting outcome.
    ///
    /// - Unknown method names return [`Outcome::NotImplemented`] without
    ///   invoking any handler.
    /// - A handler's outcome is forwarded unchanged.
    /// - A panicking handler yields [`Outcome::failure`] with the panic
    ///   message, so the caller always receives a well-formed outcome.
    pub async fn dispatch(&self, call: MethodCall) -> Outcome {
        let Some(handler) = self.handlers.get(call.name()) else {
            warn!("{}: no handler for '{}'", self.name, call.name());
            return Outcome::NotImplemented;
        };

        debug!("{}: dispatching '{}'", self.name, call.name());
        match AssertUnwindSafe(handler.handle(&call)).catch_unwind().await {
            Ok(outcome) => {
                debug!("{}: '{}' -> {outcome}", self.name, call.name());
                outcome
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("{}: handler for '{}' panicked: {message}", self.name, call.name());
                Outcome::failure(message)
            }
        }
    }
}

impl fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods().collect();
        methods.sort_unstable();
        f.debug_struct("MethodChannel")
            .field("name", &self.name)
            .field("methods", &methods)
            .finish()
    }
}
