//! Hermes Charting
//!
//! Folds trades into fixed-width OHLC periods. Works on a collected trade
//! sequence ([`PeriodAggregator::periods`]) or live, attached to a gateway's
//! trade channel through [`PeriodSubscriber`].
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use hermes_charting::PeriodAggregator;
//! use hermes_core::{Side, Trade};
//! use rust_decimal_macros::dec;
//!
//! let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();
//! let mut aggregator = PeriodAggregator::new(Duration::seconds(60)).unwrap();
//!
//! aggregator.push(Trade::new("t0", Side::Buy, dec!(10), dec!(1), at(0))).unwrap();
//! aggregator.push(Trade::new("t30", Side::Buy, dec!(12), dec!(1), at(30))).unwrap();
//! let closed = aggregator
//!     .push(Trade::new("t70", Side::Sell, dec!(9), dec!(1), at(70)))
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(closed.high(), dec!(12));
//! assert_eq!(aggregator.current().unwrap().open(), dec!(9));
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod period;
pub mod subscriber;

pub use aggregator::{PeriodAggregator, Periods};
pub use config::AggregatorConfig;
pub use error::{AggregatorError, AggregatorResult};
pub use period::Period;
pub use subscriber::PeriodSubscriber;
