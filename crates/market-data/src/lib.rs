//! Quotewatch Market Data Crate
//!
//! This crate provides multi-source quote acquisition for Chinese A-share
//! tickers with ordered fallback across providers.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Market inference for Shanghai / Shenzhen tickers
//! - Multiple providers: Sina, Eastmoney, Xueqiu
//! - Ordered fallback: the first provider returning a structurally valid
//!   quote wins, remaining providers are not attempted
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Ticker       | --> |     Market       |  (SH/SZ routing tokens)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ProviderRegistry |  (ordered fallback)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  QuoteProvider   |  (Sina, Eastmoney, Xueqiu)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    StockQuote    |  (normalized snapshot)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Market`] - Exchange inferred from the ticker's leading digit
//! - [`StockQuote`] - Normalized quote with prices, volume and turnover
//! - [`QuoteProvider`] - Trait implemented by each data-source adapter
//! - [`ProviderRegistry`] - Priority-ordered fallback over providers

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;

// Re-export the public surface
pub use errors::MarketDataError;
pub use models::StockQuote;
pub use provider::eastmoney::EastmoneyProvider;
pub use provider::sina::SinaProvider;
pub use provider::xueqiu::XueqiuProvider;
pub use provider::QuoteProvider;
pub use registry::{ProviderRegistry, RegistryConfig};
pub use resolver::Market;
