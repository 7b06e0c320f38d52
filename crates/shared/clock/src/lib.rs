//! Hermes Clock Infrastructure
//!
//! Time sources for the gateway:
//!
//! - [`SystemClock`]: real wall-clock time for production
//! - [`ManualClock`]: frozen time that only moves when advanced, for tests
//!   and replays
//!
//! ## Usage
//!
//! ```
//! use hermes_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::at_unix(1_700_000_000, 0);
//! clock.advance(Duration::seconds(1));
//! assert_eq!(clock.now().timestamp(), 1_700_000_001);
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use hermes_ports::Clock;
