use chrono::Utc;
use hermes_core::Timestamp;
use hermes_ports::Clock;
use std::sync::Arc;

/// Wall-clock time, as reported by the operating system
///
/// Rate-limit windows follow the wall clock's whole seconds, so a clock
/// adjustment (NTP step) simply opens a new window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// A shareable handle, ready to inject into a gateway
    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
