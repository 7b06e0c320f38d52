use hermes_core::{Message, MessageType};
use log::{debug, trace};
use std::sync::Arc;

use super::{Channel, Subscriber};
use crate::error::PublishError;

/// The fixed set of channels a provider advertises
///
/// Built once from the configured message types; no channel is added or
/// removed afterwards.
#[derive(Debug)]
pub struct ChannelRegistry {
    /// At most one channel per type, in configuration order
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// Create one channel per distinct type (duplicates collapse)
    pub fn new(types: impl IntoIterator<Item = MessageType>) -> Self {
        let mut channels: Vec<Channel> = Vec::new();
        for kind in types {
            if channels.iter().all(|channel| channel.kind() != kind) {
                channels.push(Channel::new(kind));
            }
        }
        Self { channels }
    }

    /// Registry with every message type (Ticker, OrderBook, Trade)
    pub fn with_all_types() -> Self {
        Self::new(MessageType::ALL)
    }

    pub fn supports(&self, kind: MessageType) -> bool {
        self.channel(kind).is_some()
    }

    /// Advertised channel types, in configuration order
    pub fn supported_types(&self) -> Vec<MessageType> {
        self.channels.iter().map(Channel::kind).collect()
    }

    pub fn channel(&self, kind: MessageType) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.kind() == kind)
    }

    /// Attach `subscriber` to the channel of `kind`
    ///
    /// Returns false, without error, when the provider has no such channel.
    pub fn subscribe<S: Subscriber + 'static>(
        &self,
        kind: MessageType,
        subscriber: &Arc<S>,
    ) -> bool {
        match self.channel(kind) {
            Some(channel) => {
                channel.attach(subscriber);
                debug!("Subscriber '{}' attached to {} channel", subscriber.name(), kind);
                true
            }
            None => {
                debug!(
                    "Subscriber '{}' ignored: {} channel not supported",
                    subscriber.name(),
                    kind
                );
                false
            }
        }
    }

    /// Publish `message` on the channel of `kind`
    ///
    /// The message's own tag must equal `kind`. Publishing to a type the
    /// provider does not advertise delivers nothing and returns `Ok(0)`.
    pub fn publish(&self, kind: MessageType, message: &Message) -> Result<usize, PublishError> {
        if message.kind() != kind {
            return Err(PublishError::TypeMismatch {
                channel: kind,
                message: message.kind(),
            });
        }

        match self.channel(kind) {
            Some(channel) => channel.notify(message),
            None => {
                trace!("No {} channel, message dropped", kind);
                Ok(0)
            }
        }
    }

    /// Publish `message` on the channel named by its own tag
    pub fn publish_message(&self, message: &Message) -> Result<usize, PublishError> {
        self.publish(message.kind(), message)
    }

    /// Live subscribers on the channel of `kind` (0 when unsupported)
    pub fn subscriber_count(&self, kind: MessageType) -> usize {
        self.channel(kind).map_or(0, Channel::subscriber_count)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::with_all_types()
    }
}
