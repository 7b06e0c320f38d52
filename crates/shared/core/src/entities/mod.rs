mod account;
mod currency;
mod market_data;
mod order;
mod order_book;
mod order_type;
mod side;
mod ticker;
mod trade;

pub use account::{Account, Balance};
pub use currency::{Currency, CurrencyPair};
pub use market_data::MarketData;
pub use order::{OpenOrder, Order};
pub use order_book::{BookLevel, OrderBook};
pub use order_type::OrderType;
pub use side::Side;
pub use ticker::Ticker;
pub use trade::Trade;
