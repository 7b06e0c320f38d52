use serde::{Deserialize, Serialize};

use super::CurrencyPair;
use crate::values::{Price, Quantity, Timestamp};

/// Rolling market statistics for one pair (typically 24h)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub pair: CurrencyPair,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub last: Price,
    pub volume: Quantity,
    pub timestamp: Timestamp,
}
