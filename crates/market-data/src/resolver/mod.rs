//! Market inference for A-share tickers.

mod market;

pub use market::Market;
