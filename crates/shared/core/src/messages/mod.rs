//! Market event messages routed through gateway channels
//!
//! A [`Message`] carries its own [`MessageType`] tag; the tag decides which
//! channel the message may be published on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{OrderBook, Ticker, Trade};
use crate::values::Timestamp;

/// Kind of market event, one channel per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Ticker,
    OrderBook,
    Trade,
}

impl MessageType {
    /// Every message type, in declaration order
    pub const ALL: [MessageType; 3] = [
        MessageType::Ticker,
        MessageType::OrderBook,
        MessageType::Trade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::OrderBook => "order_book",
            Self::Trade => "trade",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A market event observed by an exchange transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Ticker(Ticker),
    OrderBook(OrderBook),
    Trade(Trade),
}

impl Message {
    /// The routing tag of this message
    pub fn kind(&self) -> MessageType {
        match self {
            Message::Ticker(_) => MessageType::Ticker,
            Message::OrderBook(_) => MessageType::OrderBook,
            Message::Trade(_) => MessageType::Trade,
        }
    }

    /// Provider timestamp of the underlying event
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Message::Ticker(ticker) => ticker.timestamp,
            Message::OrderBook(book) => book.timestamp,
            Message::Trade(trade) => trade.timestamp(),
        }
    }

    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            Message::Trade(trade) => Some(trade),
            _ => None,
        }
    }
}

impl From<Ticker> for Message {
    fn from(ticker: Ticker) -> Self {
        Message::Ticker(ticker)
    }
}

impl From<OrderBook> for Message {
    fn from(book: OrderBook) -> Self {
        Message::OrderBook(book)
    }
}

impl From<Trade> for Message {
    fn from(trade: Trade) -> Self {
        Message::Trade(trade)
    }
}
