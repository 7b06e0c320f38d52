use hermes_core::{Message, MessageType};
use log::{trace, warn};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

use super::Subscriber;
use crate::error::{NotificationFailure, PublishError};

/// A typed topic: one message kind, many subscribers
pub struct Channel {
    kind: MessageType,
    /// Attachment order is notification order
    subscribers: RwLock<Vec<Weak<dyn Subscriber>>>,
}

impl Channel {
    pub fn new(kind: MessageType) -> Self {
        Self {
            kind,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// The message kind this channel carries
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Attach a subscriber without taking ownership of it
    pub fn attach<S: Subscriber + 'static>(&self, subscriber: &Arc<S>) {
        let handle: Weak<S> = Arc::downgrade(subscriber);
        let handle: Weak<dyn Subscriber> = handle;
        self.subscribers.write().push(handle);
    }

    /// Number of attached subscribers that are still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|handle| handle.strong_count() > 0)
            .count()
    }

    /// Drop handles whose subscriber no longer exists, returning how many
    pub fn prune(&self) -> usize {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|handle| handle.strong_count() > 0);
        before - subscribers.len()
    }

    /// Deliver `message` to every live subscriber, in attachment order
    ///
    /// Returns how many subscribers were notified. A failing subscriber does
    /// not stop delivery to the rest; all failures are returned together once
    /// every subscriber has run.
    pub fn notify(&self, message: &Message) -> Result<usize, PublishError> {
        if message.kind() != self.kind {
            return Err(PublishError::TypeMismatch {
                channel: self.kind,
                message: message.kind(),
            });
        }

        // Copy-on-notify: subscribers may attach while we iterate
        let snapshot: Vec<Weak<dyn Subscriber>> = self.subscribers.read().clone();

        let mut delivered = 0;
        let mut dead = 0;
        let mut failures = Vec::new();

        for handle in snapshot {
            let Some(subscriber) = handle.upgrade() else {
                dead += 1;
                continue;
            };

            match subscriber.notify(message) {
                Ok(()) => delivered += 1,
                Err(error) => {
                    warn!(
                        "Subscriber '{}' failed on {} channel: {}",
                        subscriber.name(),
                        self.kind,
                        error
                    );
                    failures.push(NotificationFailure {
                        subscriber: subscriber.name().to_string(),
                        error,
                    });
                }
            }
        }

        if dead > 0 {
            trace!("Pruning {} dropped subscriber(s) from {} channel", dead, self.kind);
            self.prune();
        }

        if failures.is_empty() {
            Ok(delivered)
        } else {
            Err(PublishError::Subscribers {
                channel: self.kind,
                delivered,
                failures,
            })
        }
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("kind", &self.kind)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
