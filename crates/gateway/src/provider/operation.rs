use std::fmt;

/// The uniform operations every provider exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchCurrencies,
    FetchCurrencyPairs,
    FetchMarketData,
    FetchTicker,
    FetchTradeHistory,
    FetchOrderBook,
    FetchBalance,
    FetchOpenOrders,
    PlaceOrder,
    CancelOrder,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchCurrencies => "fetch_currencies",
            Self::FetchCurrencyPairs => "fetch_currency_pairs",
            Self::FetchMarketData => "fetch_market_data",
            Self::FetchTicker => "fetch_ticker",
            Self::FetchTradeHistory => "fetch_trade_history",
            Self::FetchOrderBook => "fetch_order_book",
            Self::FetchBalance => "fetch_balance",
            Self::FetchOpenOrders => "fetch_open_orders",
            Self::PlaceOrder => "place_order",
            Self::CancelOrder => "cancel_order",
        }
    }

    /// Whether the operation changes account state on the exchange
    pub fn is_trading(&self) -> bool {
        matches!(self, Self::PlaceOrder | Self::CancelOrder)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
