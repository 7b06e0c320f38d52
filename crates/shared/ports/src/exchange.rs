use async_trait::async_trait;
use hermes_core::{
    Account, Balance, Currency, CurrencyPair, MarketData, OpenOrder, Order, OrderBook, OrderId,
    Ticker, Trade,
};

use crate::error::ApiResult;

/// Port for a concrete exchange integration
///
/// One method per uniform gateway operation. Implementations own the
/// transport, request signing and response parsing; the gateway only calls
/// these methods after the request budget allows it.
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// Exchange name for logging
    fn name(&self) -> &str;

    /// Called once when the gateway starts (connect, warm caches, ...)
    async fn start(&self) -> ApiResult<()> {
        Ok(())
    }

    /// Currencies listed by the exchange
    async fn currencies(&self) -> ApiResult<Vec<Currency>>;

    /// Tradeable pairs among the given currencies
    async fn currency_pairs(&self, currencies: &[Currency]) -> ApiResult<Vec<CurrencyPair>>;

    /// Rolling statistics for every listed pair
    async fn market_data(&self) -> ApiResult<Vec<MarketData>>;

    async fn ticker(&self) -> ApiResult<Ticker>;

    /// Recent public trades, oldest first
    async fn trade_history(&self) -> ApiResult<Vec<Trade>>;

    async fn order_book(&self) -> ApiResult<OrderBook>;

    async fn balance(&self, account: &Account) -> ApiResult<Vec<Balance>>;

    async fn open_orders(&self, account: &Account) -> ApiResult<Vec<OpenOrder>>;

    /// Submit an order, returning the exchange-assigned id
    async fn place_order(&self, order: &Order, account: &Account) -> ApiResult<OrderId>;

    async fn cancel_order(&self, order_id: &OrderId, account: &Account) -> ApiResult<()>;
}
