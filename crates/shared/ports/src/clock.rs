use hermes_core::Timestamp;

/// Port for time abstraction
///
/// The rate limiter reads wall-clock time through this port so that:
/// - production uses real system time
/// - tests pin or step time deterministically
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
