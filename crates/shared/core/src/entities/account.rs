use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::Quantity;

/// Handle to an exchange account
///
/// Credentials are deliberately absent: signing belongs to the exchange
/// integration, which resolves the account id to whatever it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub label: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}

/// Balance of one currency in an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Currency code (e.g. "BTC")
    pub currency: String,
    /// Available for trading or withdrawal
    pub available: Quantity,
    /// Held by open orders
    pub reserved: Quantity,
}

impl Balance {
    /// Total balance (available + reserved)
    pub fn total(&self) -> Decimal {
        self.available + self.reserved
    }
}
