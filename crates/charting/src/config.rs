//! Aggregation settings

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Width of each period in seconds
    #[serde(default = "default_bucket_width_secs")]
    pub bucket_width_secs: u64,
}

fn default_bucket_width_secs() -> u64 {
    60
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            bucket_width_secs: default_bucket_width_secs(),
        }
    }
}

impl AggregatorConfig {
    pub fn with_bucket_width_secs(mut self, secs: u64) -> Self {
        self.bucket_width_secs = secs;
        self
    }

    /// Bucket width as a duration
    ///
    /// Widths too large to represent come back as zero, which the aggregator
    /// rejects.
    pub fn bucket_width(&self) -> Duration {
        i64::try_from(self.bucket_width_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(Duration::zero)
    }
}
