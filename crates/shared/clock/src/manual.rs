use chrono::{Duration, TimeZone, Utc};
use hermes_core::Timestamp;
use hermes_ports::Clock;
use parking_lot::RwLock;
use std::sync::Arc;

/// Clock that only moves when told to
///
/// Used wherever time must be deterministic: rate-limit windows in tests,
/// replaying recorded trade streams, etc. Cloning is cheap and every clone
/// observes the same time.
#[derive(Clone)]
pub struct ManualClock {
    current: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    /// Create a clock frozen at `time`
    pub fn new(time: Timestamp) -> Self {
        Self {
            current: Arc::new(RwLock::new(time)),
        }
    }

    /// Create a clock frozen at the given Unix time (seconds + millis)
    pub fn at_unix(secs: i64, millis: u32) -> Self {
        let base = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(base + Duration::milliseconds(i64::from(millis)))
    }

    /// Move the clock forward (or backward, for a negative duration)
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.write();
        *current += duration;
    }

    /// Jump to an explicit time
    ///
    /// Warning: this can move time backwards.
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
