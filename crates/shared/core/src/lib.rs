//! Hermes Core Domain
//!
//! Pure domain types for the Hermes exchange gateway.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod messages;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Account types
    Account,
    Balance,
    // Market data
    BookLevel,
    Currency,
    CurrencyPair,
    MarketData,
    // Orders
    OpenOrder,
    Order,
    OrderBook,
    OrderType,
    Side,
    Ticker,
    Trade,
};
pub use messages::{Message, MessageType};
pub use values::{OrderId, Price, Quantity, Timestamp, TradeId};
