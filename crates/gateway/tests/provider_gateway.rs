//! Integration test: ProviderGateway <-> mock exchange
//!
//! Exercises the dispatch path (rate limit -> integration) and the event
//! path (propagate -> channels -> subscribers) end to end.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use hermes_clock::ManualClock;
use hermes_core::{
    Account, Balance, BookLevel, Currency, CurrencyPair, MarketData, Message, MessageType,
    OpenOrder, Order, OrderBook, OrderId, Side, Ticker, Timestamp, Trade,
};
use hermes_gateway::{
    GatewayConfig, GatewayError, NotifyError, Operation, ProviderGateway, ProviderState,
    PublishError, Subscriber,
};
use hermes_ports::{ApiError, ApiResult, ExchangeApi};
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn epoch() -> Timestamp {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn pair() -> CurrencyPair {
    CurrencyPair::new("BTC", "USD")
}

/// Exchange integration that answers from canned data and counts calls
#[derive(Default)]
struct MockExchange {
    calls: AtomicUsize,
    starts: AtomicUsize,
    fail_start: Mutex<bool>,
    fail_with: Mutex<Option<ApiError>>,
    placed: Mutex<Vec<Order>>,
    cancelled: Mutex<Vec<OrderId>>,
}

impl MockExchange {
    fn call(&self) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeApi for MockExchange {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&self) -> ApiResult<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if *self.fail_start.lock() {
            return Err(ApiError::Network("connect refused".to_string()));
        }
        Ok(())
    }

    async fn currencies(&self) -> ApiResult<Vec<Currency>> {
        self.call()?;
        Ok(vec![Currency::new("BTC"), Currency::new("USD"), Currency::new("ETH")])
    }

    async fn currency_pairs(&self, currencies: &[Currency]) -> ApiResult<Vec<CurrencyPair>> {
        self.call()?;
        let all = [pair(), CurrencyPair::new("ETH", "USD")];
        Ok(all
            .into_iter()
            .filter(|p| currencies.iter().any(|c| p.base == c.code))
            .collect())
    }

    async fn market_data(&self) -> ApiResult<Vec<MarketData>> {
        self.call()?;
        Ok(vec![MarketData {
            pair: pair(),
            open: dec!(100),
            high: dec!(110),
            low: dec!(95),
            last: dec!(105),
            volume: dec!(1000),
            timestamp: epoch(),
        }])
    }

    async fn ticker(&self) -> ApiResult<Ticker> {
        self.call()?;
        Ok(Ticker {
            pair: pair(),
            bid: dec!(99),
            ask: dec!(101),
            last: dec!(100),
            volume: dec!(12),
            timestamp: epoch(),
        })
    }

    async fn trade_history(&self) -> ApiResult<Vec<Trade>> {
        self.call()?;
        Ok(vec![
            Trade::new("t-1", Side::Buy, dec!(100), dec!(1), epoch()),
            Trade::new("t-2", Side::Sell, dec!(101), dec!(2), epoch()),
        ])
    }

    async fn order_book(&self) -> ApiResult<OrderBook> {
        self.call()?;
        Ok(OrderBook {
            pair: pair(),
            bids: vec![BookLevel::new(dec!(99), dec!(1))],
            asks: vec![BookLevel::new(dec!(101), dec!(1))],
            timestamp: epoch(),
        })
    }

    async fn balance(&self, account: &Account) -> ApiResult<Vec<Balance>> {
        self.call()?;
        if account.id != "acc-1" {
            return Err(ApiError::Authentication(format!("unknown account {}", account.id)));
        }
        Ok(vec![Balance {
            currency: "USD".to_string(),
            available: dec!(1000),
            reserved: dec!(250),
        }])
    }

    async fn open_orders(&self, _account: &Account) -> ApiResult<Vec<OpenOrder>> {
        self.call()?;
        Ok(self
            .placed
            .lock()
            .iter()
            .enumerate()
            .map(|(i, order)| OpenOrder {
                id: format!("o-{}", i + 1),
                order: order.clone(),
                filled: dec!(0),
                created_at: epoch(),
            })
            .collect())
    }

    async fn place_order(&self, order: &Order, _account: &Account) -> ApiResult<OrderId> {
        self.call()?;
        let mut placed = self.placed.lock();
        placed.push(order.clone());
        Ok(format!("o-{}", placed.len()))
    }

    async fn cancel_order(&self, order_id: &OrderId, _account: &Account) -> ApiResult<()> {
        self.call()?;
        self.cancelled.lock().push(order_id.clone());
        Ok(())
    }
}

fn gateway(limit: u32) -> (ProviderGateway<MockExchange>, ManualClock) {
    let clock = ManualClock::new(epoch());
    let config = GatewayConfig::default().with_requests_per_second(limit);
    let gateway = ProviderGateway::new(config, MockExchange::default(), Arc::new(clock.clone()))
        .expect("valid config");
    (gateway, clock)
}

/// Subscriber that records what it saw into a shared journal
struct Journal {
    name: String,
    entries: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl Journal {
    fn new(name: &str, entries: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            entries: Arc::clone(entries),
            fail: false,
        })
    }
}

impl Subscriber for Journal {
    fn notify(&self, message: &Message) -> Result<(), NotifyError> {
        self.entries
            .lock()
            .push(format!("{}:{}", self.name, message.kind()));
        if self.fail {
            return Err(NotifyError::new("journal full"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn trade_message(id: &str) -> Message {
    Message::Trade(Trade::new(id, Side::Buy, dec!(100), dec!(1), epoch()))
}

fn book_message() -> Message {
    Message::OrderBook(OrderBook {
        pair: pair(),
        bids: vec![],
        asks: vec![],
        timestamp: epoch(),
    })
}

// === Rate limiting ===

#[tokio::test]
async fn test_limit_three_scenario() {
    let _ = env_logger::try_init();
    let (gateway, clock) = gateway(3);

    for _ in 0..3 {
        gateway.fetch_ticker().await.expect("within budget");
    }

    clock.advance(Duration::milliseconds(400));
    let err = gateway.fetch_ticker().await.unwrap_err();
    assert!(err.is_rate_limited());
    match err {
        GatewayError::RateLimitExceeded {
            operation,
            limit,
            retry_after,
        } => {
            assert_eq!(operation, Operation::FetchTicker);
            assert_eq!(limit, 3);
            assert_eq!(retry_after, std::time::Duration::from_millis(600));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Rejected call never reached the exchange
    assert_eq!(gateway.api().calls(), 3);

    clock.advance(Duration::seconds(1));
    assert!(gateway.fetch_ticker().await.is_ok());
    assert_eq!(gateway.api().calls(), 4);
}

#[tokio::test]
async fn test_budget_is_shared_across_operations() {
    let (gateway, clock) = gateway(4);
    let account = Account::new("acc-1");

    gateway.fetch_currencies().await.unwrap();
    gateway.fetch_order_book().await.unwrap();
    gateway.fetch_balance(&account).await.unwrap();
    gateway.fetch_market_data().await.unwrap();

    let err = gateway
        .place_order(&Order::market(pair(), Side::Buy, dec!(1)), &account)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::RateLimitExceeded {
            operation: Operation::PlaceOrder,
            ..
        }
    ));
    assert!(gateway.api().placed.lock().is_empty());

    let stats = gateway.stats();
    assert_eq!(stats.dispatched, 4);
    assert_eq!(stats.rejected, 1);
    assert_eq!(gateway.rate_limit_status().remaining, 0);

    clock.advance(Duration::seconds(1));
    assert_eq!(gateway.rate_limit_status().remaining, 4);
}

#[tokio::test]
async fn test_every_limit_admits_exactly_limit_calls_per_second() {
    for limit in 1..=6 {
        let (gateway, clock) = gateway(limit);

        for _ in 0..limit {
            assert!(gateway.fetch_trade_history().await.is_ok());
        }
        assert!(gateway.fetch_trade_history().await.unwrap_err().is_rate_limited());

        clock.advance(Duration::seconds(1));
        assert!(gateway.fetch_trade_history().await.is_ok());
    }
}

#[tokio::test]
async fn test_concurrent_callers_share_one_budget() {
    let (gateway, _clock) = gateway(5);
    let gateway = Arc::new(gateway);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move { gateway.fetch_ticker().await.is_ok() })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 5);
    assert_eq!(gateway.api().calls(), 5);
}

#[test]
fn test_zero_limit_config_is_rejected() {
    let config = GatewayConfig::default().with_requests_per_second(0);
    let result = ProviderGateway::new(
        config,
        MockExchange::default(),
        Arc::new(ManualClock::new(epoch())),
    );
    assert!(matches!(result, Err(GatewayError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_system_clock_gateway_dispatches() {
    let gateway =
        ProviderGateway::with_system_clock(GatewayConfig::default(), MockExchange::default())
            .unwrap();

    gateway.fetch_currencies().await.unwrap();
    assert_eq!(gateway.api().calls(), 1);
    assert!(gateway.rate_limit_status().used <= 1);
}

// === Dispatch ===

#[tokio::test]
async fn test_operations_reach_the_exchange() {
    let (gateway, _clock) = gateway(100);
    let account = Account::new("acc-1");

    let currencies = gateway.fetch_currencies().await.unwrap();
    assert_eq!(currencies.len(), 3);

    let pairs = gateway
        .fetch_currency_pairs(&[Currency::new("ETH")])
        .await
        .unwrap();
    assert_eq!(pairs, vec![CurrencyPair::new("ETH", "USD")]);

    let ticker = gateway.fetch_ticker().await.unwrap();
    assert_eq!(ticker.spread(), dec!(2));

    let history = gateway.fetch_trade_history().await.unwrap();
    assert_eq!(history.len(), 2);

    let balances = gateway.fetch_balance(&account).await.unwrap();
    assert_eq!(balances[0].total(), dec!(1250));

    let order = Order::limit(pair(), Side::Buy, dec!(0.5), dec!(42000));
    let order_id = gateway.place_order(&order, &account).await.unwrap();
    assert_eq!(order_id, "o-1");

    let open = gateway.fetch_open_orders(&account).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].order, order);

    gateway.cancel_order(&order_id, &account).await.unwrap();
    assert_eq!(*gateway.api().cancelled.lock(), vec!["o-1".to_string()]);

    assert_eq!(gateway.stats().dispatched, 8);
}

#[tokio::test]
async fn test_exchange_errors_pass_through_unchanged() {
    let (gateway, _clock) = gateway(10);

    let err = gateway
        .fetch_balance(&Account::new("stranger"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Api(ApiError::Authentication("unknown account stranger".to_string()))
    );

    *gateway.api().fail_with.lock() = Some(ApiError::Parse("unexpected token".to_string()));
    let err = gateway.fetch_order_book().await.unwrap_err();
    assert_eq!(err.to_string(), "Malformed response: unexpected token");

    // Failed calls still consumed budget and were not retried
    assert_eq!(gateway.api().calls(), 2);
    assert_eq!(gateway.stats().failed, 2);
    assert_eq!(gateway.rate_limit_status().used, 2);
}

// === Lifecycle ===

#[tokio::test]
async fn test_start_is_idempotent() {
    let (gateway, _clock) = gateway(10);
    assert_eq!(gateway.state(), ProviderState::NotStarted);

    gateway.start().await.unwrap();
    gateway.start().await.unwrap();

    assert!(gateway.is_started());
    assert_eq!(gateway.api().starts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_start_stays_not_started() {
    let (gateway, _clock) = gateway(10);
    *gateway.api().fail_start.lock() = true;

    let err = gateway.start().await.unwrap_err();
    assert!(matches!(err, GatewayError::Api(ApiError::Network(_))));
    assert!(!gateway.is_started());

    *gateway.api().fail_start.lock() = false;
    gateway.start().await.unwrap();
    assert!(gateway.is_started());
    assert_eq!(gateway.api().starts.load(Ordering::SeqCst), 2);
}

// === Channels ===

#[tokio::test]
async fn test_two_subscribers_notified_once_in_order() {
    let (gateway, _clock) = gateway(10);
    let entries = Arc::new(Mutex::new(Vec::new()));
    let first = Journal::new("first", &entries);
    let second = Journal::new("second", &entries);

    assert!(gateway.bind_channel(MessageType::Trade, &first));
    assert!(gateway.bind_channel(MessageType::Trade, &second));

    let delivered = gateway
        .propagate(MessageType::Trade, &trade_message("t-1"))
        .unwrap();

    assert_eq!(delivered, 2);
    assert_eq!(*entries.lock(), vec!["first:trade", "second:trade"]);
}

#[tokio::test]
async fn test_unsupported_channel_never_notifies() {
    let clock = ManualClock::new(epoch());
    let config = GatewayConfig::default().with_channels([MessageType::Ticker, MessageType::Trade]);
    let gateway =
        ProviderGateway::new(config, MockExchange::default(), Arc::new(clock)).unwrap();

    let entries = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Journal::new("books", &entries);

    assert!(!gateway.bind_channel(MessageType::OrderBook, &subscriber));
    assert_eq!(
        gateway.propagate(MessageType::OrderBook, &book_message()),
        Ok(0)
    );
    assert!(entries.lock().is_empty());
    assert_eq!(
        gateway.supported_channels(),
        vec![MessageType::Ticker, MessageType::Trade]
    );
}

#[tokio::test]
async fn test_propagate_rejects_mismatched_tag() {
    let (gateway, _clock) = gateway(10);
    let entries = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Journal::new("books", &entries);
    gateway.bind_channel(MessageType::OrderBook, &subscriber);

    let result = gateway.propagate(MessageType::OrderBook, &trade_message("t-1"));
    assert_eq!(
        result,
        Err(PublishError::TypeMismatch {
            channel: MessageType::OrderBook,
            message: MessageType::Trade,
        })
    );
    assert!(entries.lock().is_empty());

    assert_eq!(gateway.propagate_message(&book_message()), Ok(1));
}

#[tokio::test]
async fn test_failing_subscriber_is_isolated() {
    let (gateway, _clock) = gateway(10);
    let entries = Arc::new(Mutex::new(Vec::new()));
    let broken = Arc::new(Journal {
        name: "broken".to_string(),
        entries: Arc::clone(&entries),
        fail: true,
    });
    let healthy = Journal::new("healthy", &entries);
    gateway.bind_channel(MessageType::Trade, &broken);
    gateway.bind_channel(MessageType::Trade, &healthy);

    let err = gateway
        .propagate(MessageType::Trade, &trade_message("t-1"))
        .unwrap_err();

    assert_eq!(*entries.lock(), vec!["broken:trade", "healthy:trade"]);
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].subscriber, "broken");

    // Surfaces through the gateway error type as well
    let gateway_err = GatewayError::from(err);
    assert!(gateway_err.to_string().contains("trade channel"));
}

#[tokio::test]
async fn test_gateway_does_not_own_subscribers() {
    let (gateway, _clock) = gateway(10);
    let entries = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Journal::new("short-lived", &entries);
    gateway.bind_channel(MessageType::Trade, &subscriber);
    assert_eq!(gateway.channels().subscriber_count(MessageType::Trade), 1);

    drop(subscriber);

    assert_eq!(gateway.channels().subscriber_count(MessageType::Trade), 0);
    assert_eq!(
        gateway.propagate(MessageType::Trade, &trade_message("t-1")),
        Ok(0)
    );
    assert!(entries.lock().is_empty());
}

#[tokio::test]
async fn test_subscribers_see_publish_order() {
    let (gateway, _clock) = gateway(10);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscriber = Arc::new(move |message: &Message| -> Result<(), NotifyError> {
        if let Some(trade) = message.as_trade() {
            sink.lock().push(trade.id().to_string());
        }
        Ok(())
    });
    gateway.bind_channel(MessageType::Trade, &subscriber);

    for id in ["a", "b", "c"] {
        gateway.propagate_message(&trade_message(id)).unwrap();
    }

    assert_eq!(*seen.lock(), vec!["a", "b", "c"]);
}
