//! Typed publish/subscribe layer
//!
//! One [`Channel`] per [`MessageType`](hermes_core::MessageType), owned by a
//! [`ChannelRegistry`] built once per provider. Channels hold weak handles to
//! [`Subscriber`]s: attaching never extends a subscriber's lifetime, and a
//! dropped subscriber simply stops receiving.
//!
//! Fan-out is synchronous and best-effort per subscriber: every live
//! subscriber is notified, in attachment order, before `publish` returns, and
//! failures are reported together afterwards.

mod channel;
mod registry;

pub use channel::Channel;
pub use registry::ChannelRegistry;

use hermes_core::Message;

use crate::error::NotifyError;

/// Receiver of channel notifications
pub trait Subscriber: Send + Sync {
    /// Handle one published message
    fn notify(&self, message: &Message) -> Result<(), NotifyError>;

    /// Name used when reporting notification failures
    fn name(&self) -> &str {
        "subscriber"
    }
}

impl<F> Subscriber for F
where
    F: Fn(&Message) -> Result<(), NotifyError> + Send + Sync,
{
    fn notify(&self, message: &Message) -> Result<(), NotifyError> {
        self(message)
    }
}
