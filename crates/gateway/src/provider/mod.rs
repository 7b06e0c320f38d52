//! Provider gateway
//!
//! [`ProviderGateway`] fronts one exchange integration. Every uniform
//! operation passes the request budget first and only then reaches the
//! integration; market events flow the other way, from the integration's
//! transport into the typed channels.

mod lifecycle;
mod operation;

pub use lifecycle::ProviderState;
pub use operation::Operation;

use hermes_clock::SystemClock;
use hermes_core::{
    Account, Balance, Currency, CurrencyPair, MarketData, Message, MessageType, OpenOrder, Order,
    OrderBook, OrderId, Ticker, Trade,
};
use hermes_ports::{ApiResult, Clock, ExchangeApi};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::channels::{ChannelRegistry, Subscriber};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult, PublishError};
use crate::rate_limiter::{RateLimitDecision, RateLimitStatus, RateLimiter};

/// Dispatch counters since construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GatewayStats {
    /// Requests forwarded to the exchange integration
    pub dispatched: u64,
    /// Requests refused by the rate limiter
    pub rejected: u64,
    /// Forwarded requests that came back with an error
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

/// Rate-limited front for one exchange integration
pub struct ProviderGateway<A> {
    api: A,
    clock: Arc<dyn Clock>,
    limiter: RateLimiter,
    channels: ChannelRegistry,
    state: RwLock<ProviderState>,
    /// Serializes start transitions across awaits
    start_lock: Mutex<()>,
    counters: Counters,
}

impl<A: ExchangeApi> ProviderGateway<A> {
    /// Create a gateway over `api`, reading time from `clock`
    pub fn new(config: GatewayConfig, api: A, clock: Arc<dyn Clock>) -> GatewayResult<Self> {
        config.validate()?;

        debug!(
            "[{}] Gateway created: {} req/s, channels {:?}",
            api.name(),
            config.requests_per_second,
            config.channels
        );

        Ok(Self {
            api,
            clock,
            limiter: RateLimiter::new(config.requests_per_second),
            channels: ChannelRegistry::new(config.channels),
            state: RwLock::new(ProviderState::NotStarted),
            start_lock: Mutex::new(()),
            counters: Counters::default(),
        })
    }

    /// Create a gateway that reads real wall-clock time
    pub fn with_system_clock(config: GatewayConfig, api: A) -> GatewayResult<Self> {
        Self::new(config, api, SystemClock::shared())
    }

    /// Name of the underlying exchange integration
    pub fn name(&self) -> &str {
        self.api.name()
    }

    /// The exchange integration behind this gateway
    pub fn api(&self) -> &A {
        &self.api
    }

    // === Lifecycle ===

    /// Start the provider
    ///
    /// Runs the integration's start hook on the first call only. Calling
    /// `start` again once started is a no-op. If the hook fails the gateway
    /// stays `NotStarted` and a later call retries it.
    pub async fn start(&self) -> GatewayResult<()> {
        let _guard = self.start_lock.lock().await;

        let Some(next) = self.state().on_start() else {
            debug!("[{}] Already started", self.name());
            return Ok(());
        };

        self.api.start().await?;
        *self.state.write() = next;
        info!("[{}] Provider started", self.name());
        Ok(())
    }

    pub fn state(&self) -> ProviderState {
        *self.state.read()
    }

    pub fn is_started(&self) -> bool {
        self.state().is_started()
    }

    // === Uniform operations ===

    pub async fn fetch_currencies(&self) -> GatewayResult<Vec<Currency>> {
        self.dispatch(Operation::FetchCurrencies, || self.api.currencies()).await
    }

    pub async fn fetch_currency_pairs(
        &self,
        currencies: &[Currency],
    ) -> GatewayResult<Vec<CurrencyPair>> {
        self.dispatch(Operation::FetchCurrencyPairs, || self.api.currency_pairs(currencies)).await
    }

    pub async fn fetch_market_data(&self) -> GatewayResult<Vec<MarketData>> {
        self.dispatch(Operation::FetchMarketData, || self.api.market_data()).await
    }

    pub async fn fetch_ticker(&self) -> GatewayResult<Ticker> {
        self.dispatch(Operation::FetchTicker, || self.api.ticker()).await
    }

    pub async fn fetch_trade_history(&self) -> GatewayResult<Vec<Trade>> {
        self.dispatch(Operation::FetchTradeHistory, || self.api.trade_history()).await
    }

    pub async fn fetch_order_book(&self) -> GatewayResult<OrderBook> {
        self.dispatch(Operation::FetchOrderBook, || self.api.order_book()).await
    }

    pub async fn fetch_balance(&self, account: &Account) -> GatewayResult<Vec<Balance>> {
        self.dispatch(Operation::FetchBalance, || self.api.balance(account)).await
    }

    pub async fn fetch_open_orders(&self, account: &Account) -> GatewayResult<Vec<OpenOrder>> {
        self.dispatch(Operation::FetchOpenOrders, || self.api.open_orders(account)).await
    }

    pub async fn place_order(&self, order: &Order, account: &Account) -> GatewayResult<OrderId> {
        self.dispatch(Operation::PlaceOrder, || self.api.place_order(order, account)).await
    }

    pub async fn cancel_order(&self, order_id: &OrderId, account: &Account) -> GatewayResult<()> {
        self.dispatch(Operation::CancelOrder, || self.api.cancel_order(order_id, account)).await
    }

    /// Admit `operation` against the budget, then run `call`
    ///
    /// The admission check also counts the request. A denied request never
    /// reaches the integration. Integration errors are returned as-is.
    async fn dispatch<T, F, Fut>(&self, operation: Operation, call: F) -> GatewayResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let now = self.clock.now();
        if let RateLimitDecision::Denied { retry_after } = self.limiter.check_and_count(now) {
            self.counters.rejected.fetch_add(1, Ordering::Relaxed);
            warn!(
                "[{}] {} rejected: {} req/s budget spent, retry in {:?}",
                self.name(),
                operation,
                self.limiter.limit(),
                retry_after
            );
            return Err(GatewayError::RateLimitExceeded {
                operation,
                limit: self.limiter.limit(),
                retry_after,
            });
        }

        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        if operation.is_trading() {
            info!("[{}] Dispatching {}", self.name(), operation);
        } else {
            debug!("[{}] Dispatching {}", self.name(), operation);
        }

        call().await.map_err(|err| {
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
            debug!("[{}] {} failed: {}", self.name(), operation, err);
            GatewayError::Api(err)
        })
    }

    // === Market events ===

    /// Publish a market event observed by the transport
    ///
    /// `kind` must match the message's own tag. Returns how many subscribers
    /// were notified.
    pub fn propagate(&self, kind: MessageType, message: &Message) -> Result<usize, PublishError> {
        self.channels.publish(kind, message)
    }

    /// Publish a market event on the channel named by its own tag
    pub fn propagate_message(&self, message: &Message) -> Result<usize, PublishError> {
        self.channels.publish_message(message)
    }

    /// Attach a consumer to the channel of `kind`
    ///
    /// The gateway keeps only a weak handle: the caller owns the subscriber.
    /// Returns false when this provider does not advertise `kind`.
    pub fn bind_channel<S: Subscriber + 'static>(
        &self,
        kind: MessageType,
        subscriber: &Arc<S>,
    ) -> bool {
        self.channels.subscribe(kind, subscriber)
    }

    /// Channel types this provider advertises
    pub fn supported_channels(&self) -> Vec<MessageType> {
        self.channels.supported_types()
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    // === Accounting ===

    /// Request budget for the current second
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.limiter.status(self.clock.now())
    }

    pub fn stats(&self) -> GatewayStats {
        GatewayStats {
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

impl<A: ExchangeApi> std::fmt::Debug for ProviderGateway<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGateway")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("limit", &self.limiter.limit())
            .field("channels", &self.channels.supported_types())
            .finish()
    }
}
