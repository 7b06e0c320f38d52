//! Trade-channel adapter
//!
//! [`PeriodSubscriber`] lets an aggregator hang off a gateway's trade
//! channel. The caller keeps the `Arc`; the channel only holds a weak handle.

use hermes_core::Message;
use hermes_gateway::{NotifyError, Subscriber};
use log::debug;
use parking_lot::Mutex;

use crate::aggregator::PeriodAggregator;
use crate::config::AggregatorConfig;
use crate::error::AggregatorResult;
use crate::period::Period;

#[derive(Debug)]
pub struct PeriodSubscriber {
    name: String,
    aggregator: Mutex<PeriodAggregator>,
}

impl PeriodSubscriber {
    pub fn new(aggregator: PeriodAggregator) -> Self {
        Self {
            name: "period-aggregator".to_string(),
            aggregator: Mutex::new(aggregator),
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> AggregatorResult<Self> {
        Ok(Self::new(PeriodAggregator::new(config.bucket_width())?))
    }

    /// Name reported in notification failures
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Snapshot of the closed history
    pub fn closed(&self) -> Vec<Period> {
        self.aggregator.lock().closed().to_vec()
    }

    /// Snapshot of the in-progress bucket
    pub fn current(&self) -> Option<Period> {
        self.aggregator.lock().current().cloned()
    }

    pub fn take_closed(&self) -> Vec<Period> {
        self.aggregator.lock().take_closed()
    }

    pub fn late_trades(&self) -> u64 {
        self.aggregator.lock().late_trades()
    }
}

impl Subscriber for PeriodSubscriber {
    fn notify(&self, message: &Message) -> Result<(), NotifyError> {
        let Some(trade) = message.as_trade() else {
            return Err(NotifyError::new(format!(
                "expected a trade message, got {}",
                message.kind()
            )));
        };

        let closed = self
            .aggregator
            .lock()
            .push(trade.clone())
            .map_err(|err| NotifyError::new(err.to_string()))?;

        if let Some(period) = closed {
            debug!(
                "[{}] Period [{}, {}) closed: O={} H={} L={} C={}",
                self.name,
                period.start(),
                period.end(),
                period.open(),
                period.high(),
                period.low(),
                period.close()
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
