use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyPair, Side};
use crate::values::{Price, Quantity, Timestamp, TradeId};

/// A public trade reported by an exchange
///
/// Trades are immutable once constructed: fields are only readable through
/// accessors. The timestamp is the provider's clock, not the local one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    side: Side,
    price: Price,
    volume: Quantity,
    timestamp: Timestamp,
    /// Pair the trade happened on (absent for single-pair feeds)
    pair: Option<CurrencyPair>,
}

impl Trade {
    /// Create a new trade with an explicit provider timestamp
    pub fn new(
        id: impl Into<TradeId>,
        side: Side,
        price: Price,
        volume: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            side,
            price,
            volume,
            timestamp,
            pair: None,
        }
    }

    /// Tag the trade with the pair it traded on
    pub fn with_pair(mut self, pair: CurrencyPair) -> Self {
        self.pair = Some(pair);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn volume(&self) -> Quantity {
        self.volume
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn pair(&self) -> Option<&CurrencyPair> {
        self.pair.as_ref()
    }

    /// Returns the notional value of the trade (price * volume)
    pub fn notional(&self) -> Decimal {
        self.price * self.volume
    }
}
