//! Error types for the gateway crate

use hermes_core::MessageType;
use hermes_ports::ApiError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::provider::Operation;

/// Failure raised by a subscriber while handling a notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct NotifyError(String);

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// One subscriber's failure during a fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFailure {
    /// Name reported by the failing subscriber
    pub subscriber: String,
    pub error: NotifyError,
}

impl fmt::Display for NotificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subscriber, self.error)
    }
}

/// Publish-path errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The message's own tag disagrees with the requested channel
    #[error("Cannot publish a {message} message on the {channel} channel")]
    TypeMismatch {
        channel: MessageType,
        message: MessageType,
    },

    /// Fan-out completed but some subscribers failed
    #[error(
        "{count} subscriber(s) failed on the {channel} channel ({delivered} notified)",
        count = .failures.len()
    )]
    Subscribers {
        channel: MessageType,
        delivered: usize,
        failures: Vec<NotificationFailure>,
    },
}

impl PublishError {
    /// Failures of individual subscribers, empty for a type mismatch
    pub fn failures(&self) -> &[NotificationFailure] {
        match self {
            PublishError::Subscribers { failures, .. } => failures,
            PublishError::TypeMismatch { .. } => &[],
        }
    }
}

/// Gateway-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The requests-per-second budget is spent for the current second
    #[error("Rate limit exceeded for {operation}: {limit} requests/s, retry after {retry_after:?}")]
    RateLimitExceeded {
        operation: Operation,
        limit: u32,
        retry_after: Duration,
    },

    /// Failure surfaced unchanged from the exchange integration
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl GatewayError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimitExceeded { .. })
    }

    /// How long to back off before retrying, for rate-limit rejections
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GatewayError::RateLimitExceeded { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
