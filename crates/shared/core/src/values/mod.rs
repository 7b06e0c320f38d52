use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity/volume value - uses Decimal for precision
pub type Quantity = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Exchange-assigned order identifier (opaque to the gateway)
pub type OrderId = String;

/// Exchange-assigned trade identifier (opaque to the gateway)
pub type TradeId = String;
