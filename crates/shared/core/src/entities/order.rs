use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyPair, OrderType, Side};
use crate::values::{OrderId, Price, Quantity, Timestamp};

/// Order to be placed through the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub pair: CurrencyPair,
    pub side: Side,
    pub order_type: OrderType,
    pub volume: Quantity,
    /// Required for limit orders
    pub price: Option<Price>,
}

impl Order {
    /// Create a new limit order
    pub fn limit(pair: CurrencyPair, side: Side, volume: Quantity, price: Price) -> Self {
        Self {
            pair,
            side,
            order_type: OrderType::Limit,
            volume,
            price: Some(price),
        }
    }

    /// Create a new market order
    pub fn market(pair: CurrencyPair, side: Side, volume: Quantity) -> Self {
        Self {
            pair,
            side,
            order_type: OrderType::Market,
            volume,
            price: None,
        }
    }
}

/// An order resting on the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: OrderId,
    pub order: Order,
    pub filled: Quantity,
    pub created_at: Timestamp,
}

impl OpenOrder {
    /// Volume still waiting to be filled
    pub fn remaining(&self) -> Decimal {
        (self.order.volume - self.filled).max(Decimal::ZERO)
    }
}
