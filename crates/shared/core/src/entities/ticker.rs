use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyPair;
use crate::values::{Price, Quantity, Timestamp};

/// Top-of-book and last-trade snapshot for one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub pair: CurrencyPair,
    pub bid: Price,
    pub ask: Price,
    pub last: Price,
    /// Rolling volume as reported by the exchange
    pub volume: Quantity,
    pub timestamp: Timestamp,
}

impl Ticker {
    /// Difference between best ask and best bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Midpoint of bid and ask
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}
