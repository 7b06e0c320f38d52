use serde::{Deserialize, Serialize};

use super::CurrencyPair;
use crate::values::{Price, Quantity, Timestamp};

/// Order book level (price + quantity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub quantity: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// Order book snapshot. Bids are best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub pair: CurrencyPair,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub timestamp: Timestamp,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_best_levels() {
        let book = OrderBook {
            pair: CurrencyPair::new("BTC", "USD"),
            bids: vec![
                BookLevel::new(dec!(99), dec!(1)),
                BookLevel::new(dec!(98), dec!(2)),
            ],
            asks: vec![BookLevel::new(dec!(101), dec!(3))],
            timestamp: Utc::now(),
        };

        assert_eq!(book.best_bid().map(|l| l.price), Some(dec!(99)));
        assert_eq!(book.best_ask().map(|l| l.quantity), Some(dec!(3)));
        assert!(!book.is_empty());
    }
}
