//! Gateway configuration
//!
//! Plain serde-friendly structs with defaults. Reading them from a file or
//! the environment is left to the embedding application.

use hermes_core::MessageType;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Configuration for one provider gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Maximum requests per wall-clock second (must be at least 1)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Channel types this provider advertises
    #[serde(default = "default_channels")]
    pub channels: Vec<MessageType>,
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_channels() -> Vec<MessageType> {
    MessageType::ALL.to_vec()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            channels: default_channels(),
        }
    }
}

impl GatewayConfig {
    pub fn with_requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = limit;
        self
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = MessageType>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    /// Reject settings the gateway cannot operate with
    pub fn validate(&self) -> GatewayResult<()> {
        if self.requests_per_second == 0 {
            return Err(GatewayError::InvalidConfig(
                "requests_per_second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
