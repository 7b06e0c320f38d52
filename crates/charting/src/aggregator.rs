//! Trade to period aggregation
//!
//! [`PeriodAggregator`] folds an ordered trade stream into fixed-width
//! [`Period`]s. Bucket boundaries are aligned to the Unix epoch, so two
//! aggregators with the same width always agree on where periods start.
//!
//! Trades must arrive in timestamp order. A trade older than the newest one
//! already folded is rejected with [`AggregatorError::LateTrade`] and leaves
//! the aggregator untouched; folding continues with the next trade.

use chrono::Duration;
use hermes_core::{Timestamp, Trade};
use log::{debug, warn};
use std::mem;

use crate::error::{AggregatorError, AggregatorResult};
use crate::period::Period;

const NANOS_PER_MILLI: u32 = 1_000_000;

#[derive(Debug, Clone)]
pub struct PeriodAggregator {
    width: Duration,
    width_millis: i64,
    /// Bucket still receiving trades
    open: Option<Period>,
    /// Closed periods, oldest first
    closed: Vec<Period>,
    newest: Option<Timestamp>,
    late_trades: u64,
}

impl PeriodAggregator {
    /// Create an aggregator with buckets `width` wide
    ///
    /// The width must be at least one millisecond.
    pub fn new(width: Duration) -> AggregatorResult<Self> {
        let width_millis = width.num_milliseconds();
        if width_millis <= 0 {
            return Err(AggregatorError::InvalidWidth(width));
        }

        Ok(Self {
            width,
            width_millis,
            open: None,
            closed: Vec::new(),
            newest: None,
            late_trades: 0,
        })
    }

    /// Lazily fold `trades`, yielding each period as it closes
    pub fn periods<I>(width: Duration, trades: I) -> AggregatorResult<Periods<I::IntoIter>>
    where
        I: IntoIterator<Item = Trade>,
    {
        Ok(Periods {
            trades: trades.into_iter(),
            aggregator: Self::new(width)?,
        })
    }

    pub fn width(&self) -> Duration {
        self.width
    }

    /// Fold one trade
    ///
    /// Returns the period that this trade closed, if it opened a new bucket.
    /// The closed period is also appended to [`closed`](Self::closed).
    pub fn push(&mut self, trade: Trade) -> AggregatorResult<Option<Period>> {
        let finished = self.fold(trade)?;
        if let Some(period) = &finished {
            self.closed.push(period.clone());
        }
        Ok(finished)
    }

    /// Closed history, oldest first
    pub fn closed(&self) -> &[Period] {
        &self.closed
    }

    /// The in-progress bucket; its figures may still change
    pub fn current(&self) -> Option<&Period> {
        self.open.as_ref()
    }

    /// Drain the closed history
    pub fn take_closed(&mut self) -> Vec<Period> {
        mem::take(&mut self.closed)
    }

    /// Consume the aggregator, returning closed history and the open bucket
    pub fn finish(self) -> (Vec<Period>, Option<Period>) {
        (self.closed, self.open)
    }

    /// Number of trades rejected as late
    pub fn late_trades(&self) -> u64 {
        self.late_trades
    }

    fn fold(&mut self, trade: Trade) -> AggregatorResult<Option<Period>> {
        let timestamp = trade.timestamp();

        if let Some(newest) = self.newest {
            if timestamp < newest {
                self.late_trades += 1;
                warn!(
                    "[Aggregator] Late trade {} at {} rejected (newest {})",
                    trade.id(),
                    timestamp,
                    newest
                );
                return Err(AggregatorError::LateTrade {
                    trade_id: trade.id().to_string(),
                    timestamp,
                    newest,
                });
            }
        }
        let Some((start, end)) = self.bucket_bounds(timestamp) else {
            warn!(
                "[Aggregator] Trade {} at {} rejected: bucket out of range",
                trade.id(),
                timestamp
            );
            return Err(AggregatorError::OutOfRange {
                trade_id: trade.id().to_string(),
                timestamp,
                width: self.width,
            });
        };
        self.newest = Some(timestamp);

        if let Some(open) = self.open.as_mut() {
            if open.start() == start {
                open.absorb(trade);
                return Ok(None);
            }
        }

        // Ordering guarantees the new bucket is later than the open one
        let next = Period::open_with(trade, start, end);
        let finished = self.open.replace(next);
        if let Some(period) = &finished {
            debug!(
                "[Aggregator] Closed period [{}, {}) with {} trades",
                period.start(),
                period.end(),
                period.trade_count()
            );
        }
        Ok(finished)
    }

    /// Start of the epoch-aligned bucket containing `timestamp`
    fn bucket_start(&self, timestamp: Timestamp) -> Option<Timestamp> {
        let into_bucket = timestamp.timestamp_millis().rem_euclid(self.width_millis);
        let sub_milli = timestamp.timestamp_subsec_nanos() % NANOS_PER_MILLI;
        timestamp
            .checked_sub_signed(Duration::milliseconds(into_bucket))?
            .checked_sub_signed(Duration::nanoseconds(i64::from(sub_milli)))
    }

    /// `[start, end)` of the bucket containing `timestamp`, if representable
    fn bucket_bounds(&self, timestamp: Timestamp) -> Option<(Timestamp, Timestamp)> {
        let start = self.bucket_start(timestamp)?;
        let end = start.checked_add_signed(self.width)?;
        Some((start, end))
    }
}

/// Lazy period stream over a trade iterator
///
/// Pulls trades only as far as needed to close the next period. Late trades
/// surface as `Err` items without ending the stream. Closed periods are not
/// retained.
#[derive(Debug)]
pub struct Periods<I> {
    trades: I,
    aggregator: PeriodAggregator,
}

impl<I> Periods<I> {
    /// The bucket still open when the input ran out
    pub fn into_open(self) -> Option<Period> {
        self.aggregator.open
    }

    pub fn late_trades(&self) -> u64 {
        self.aggregator.late_trades
    }
}

impl<I: Iterator<Item = Trade>> Iterator for Periods<I> {
    type Item = AggregatorResult<Period>;

    fn next(&mut self) -> Option<Self::Item> {
        for trade in self.trades.by_ref() {
            match self.aggregator.fold(trade) {
                Ok(Some(period)) => return Some(Ok(period)),
                Ok(None) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}
