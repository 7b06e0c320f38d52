//! Error types for the charting crate

use chrono::Duration;
use hermes_core::{Timestamp, TradeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    #[error("Bucket width must be positive, got {0}")]
    InvalidWidth(Duration),

    /// Trade older than the newest one already folded
    #[error("Late trade {trade_id} at {timestamp}: newest accepted trade is at {newest}")]
    LateTrade {
        trade_id: TradeId,
        timestamp: Timestamp,
        newest: Timestamp,
    },

    /// The trade's bucket reaches past the representable time range
    #[error("Trade {trade_id} at {timestamp} has no representable bucket of width {width}")]
    OutOfRange {
        trade_id: TradeId,
        timestamp: Timestamp,
        width: Duration,
    },
}

impl AggregatorError {
    pub fn is_late_trade(&self) -> bool {
        matches!(self, AggregatorError::LateTrade { .. })
    }
}

pub type AggregatorResult<T> = std::result::Result<T, AggregatorError>;
