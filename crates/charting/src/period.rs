//! OHLC period
//!
//! A [`Period`] summarizes the trades of one half-open interval
//! `[start, end)`. Only the aggregator can grow a period; once it is handed
//! out as closed it is read-only.

use chrono::Duration;
use hermes_core::{Price, Quantity, Timestamp, Trade};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    start: Timestamp,
    end: Timestamp,
    /// Ascending by timestamp
    trades: Vec<Trade>,
}

impl Period {
    /// Open a period whose first trade is `trade`
    pub(crate) fn open_with(trade: Trade, start: Timestamp, end: Timestamp) -> Self {
        let price = trade.price();
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
            start,
            end,
            trades: vec![trade],
        }
    }

    /// Fold a trade that falls inside this period and is not older than the last one
    pub(crate) fn absorb(&mut self, trade: Trade) {
        let price = trade.price();
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.trades.push(trade);
    }

    pub fn open(&self) -> Price {
        self.open
    }

    pub fn high(&self) -> Price {
        self.high
    }

    pub fn low(&self) -> Price {
        self.low
    }

    pub fn close(&self) -> Price {
        self.close
    }

    /// Inclusive lower bound
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Exclusive upper bound
    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }

    /// Sum of traded volume
    pub fn volume(&self) -> Quantity {
        self.trades.iter().map(Trade::volume).sum()
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hermes_core::Side;
    use rust_decimal_macros::dec;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn trade(id: &str, secs: i64, price: Price) -> Trade {
        Trade::new(id, Side::Buy, price, dec!(0.5), at(secs))
    }

    #[test]
    fn test_open_with_first_trade() {
        let period = Period::open_with(trade("a", 5, dec!(10)), at(0), at(60));

        assert_eq!(period.open(), dec!(10));
        assert_eq!(period.high(), dec!(10));
        assert_eq!(period.low(), dec!(10));
        assert_eq!(period.close(), dec!(10));
        assert_eq!(period.trade_count(), 1);
        assert_eq!(period.duration(), Duration::seconds(60));
    }

    #[test]
    fn test_absorb_updates_extremes() {
        let mut period = Period::open_with(trade("a", 1, dec!(10)), at(0), at(60));
        period.absorb(trade("b", 2, dec!(14)));
        period.absorb(trade("c", 3, dec!(8)));
        period.absorb(trade("d", 4, dec!(11)));

        assert_eq!(period.open(), dec!(10));
        assert_eq!(period.high(), dec!(14));
        assert_eq!(period.low(), dec!(8));
        assert_eq!(period.close(), dec!(11));
        assert_eq!(period.volume(), dec!(2.0));

        let ids: Vec<_> = period.trades().iter().map(Trade::id).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_contains_is_half_open() {
        let period = Period::open_with(trade("a", 0, dec!(1)), at(0), at(60));

        assert!(period.contains(at(0)));
        assert!(period.contains(at(59)));
        assert!(!period.contains(at(60)));
        assert!(!period.contains(at(-1)));
    }
}
