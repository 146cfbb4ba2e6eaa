//! Shared data model for the market data crate.

mod quote;

pub use quote::StockQuote;
