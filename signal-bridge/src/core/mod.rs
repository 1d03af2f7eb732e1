//! Method implementations served over the channel.

pub(crate) mod signal;
