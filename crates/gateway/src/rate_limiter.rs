//! Requests-per-second budget
//!
//! A fixed one-second window aligned to wall-clock seconds. The window check
//! and the request count happen in one critical section, so concurrent
//! callers can never jointly overshoot the limit.

use hermes_core::Timestamp;
use log::trace;
use parking_lot::Mutex;
use std::time::Duration;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Outcome of a budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request admitted; `used` counts it
    Allowed { used: u32 },
    /// Budget spent; the next second starts after `retry_after`
    Denied { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Snapshot of the budget for the second containing a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

#[derive(Debug, Default)]
struct Window {
    /// Instant that opened the current window, unset before the first request
    last_request: Option<Timestamp>,
    /// Requests admitted within that window's second
    count: u32,
}

/// Fixed-window rate limiter keyed on whole wall-clock seconds
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per second
    ///
    /// A limit of 0 admits only the very first request.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            window: Mutex::new(Window::default()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check the budget at `now` and, if admitted, count the request
    pub fn check_and_count(&self, now: Timestamp) -> RateLimitDecision {
        let mut window = self.window.lock();

        let Some(last) = window.last_request else {
            // First request ever always passes
            window.last_request = Some(now);
            window.count = 1;
            return RateLimitDecision::Allowed { used: 1 };
        };

        // Any other second (including one in the past) opens a new window
        if last.timestamp() != now.timestamp() {
            trace!("Rate limit window rolled over at {}", now);
            window.last_request = Some(now);
            window.count = 0;
        }

        if window.count < self.limit {
            window.count += 1;
            RateLimitDecision::Allowed { used: window.count }
        } else {
            RateLimitDecision::Denied {
                retry_after: until_next_second(now),
            }
        }
    }

    /// Read the budget for the second containing `now` without counting
    pub fn status(&self, now: Timestamp) -> RateLimitStatus {
        let window = self.window.lock();
        let used = match window.last_request {
            Some(last) if last.timestamp() == now.timestamp() => window.count,
            _ => 0,
        };

        RateLimitStatus {
            used,
            limit: self.limit,
            remaining: self.limit.saturating_sub(used),
        }
    }

    /// Forget all history, as if no request had ever been made
    pub fn reset(&self) {
        *self.window.lock() = Window::default();
    }
}

fn until_next_second(now: Timestamp) -> Duration {
    let elapsed = now.timestamp_subsec_nanos().min(NANOS_PER_SECOND);
    Duration::from_nanos(u64::from(NANOS_PER_SECOND - elapsed))
}
