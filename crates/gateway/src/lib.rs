//! Hermes Gateway
//!
//! Client-side gateway to exchange-style trading APIs. Provides:
//! - A uniform operation set over any [`ExchangeApi`](hermes_ports::ExchangeApi)
//!   integration
//! - A requests-per-second budget checked before every remote call
//! - Typed pub/sub channels for ticker, order-book and trade events
//!
//! ## Architecture
//!
//! ```text
//!   caller                               exchange transport
//!     │ fetch_*/place/cancel                   │ ticker/book/trade
//!  ┌──▼──────────────────────────────┐         │
//!  │ ProviderGateway                 │◄────────┘ propagate(type, msg)
//!  │  RateLimiter ─► ExchangeApi     │
//!  │  ChannelRegistry ─► Channel ×N  │
//!  └──────────────────────┬──────────┘
//!                         │ notify (in attachment order)
//!                    Subscribers (charting, strategies, ...)
//! ```

pub mod channels;
pub mod config;
pub mod error;
pub mod provider;
pub mod rate_limiter;

// Re-export commonly used types
pub use channels::{Channel, ChannelRegistry, Subscriber};
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult, NotificationFailure, NotifyError, PublishError};
pub use provider::{GatewayStats, Operation, ProviderGateway, ProviderState};
pub use rate_limiter::{RateLimitDecision, RateLimitStatus, RateLimiter};
