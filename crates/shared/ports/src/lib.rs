//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes exchange gateway.
//! These define the boundaries between the gateway core and the exchange
//! integrations and time sources it is wired to.

mod clock;
mod error;
mod exchange;

pub use clock::Clock;
pub use error::{ApiError, ApiResult};
pub use exchange::ExchangeApi;
