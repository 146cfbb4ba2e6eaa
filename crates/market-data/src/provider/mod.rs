//! Quote provider trait and the per-source adapters.

pub mod eastmoney;
pub mod headers;
pub mod sina;
pub mod xueqiu;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::resolver::Market;

/// Per-request timeout applied by every adapter's HTTP client.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Trait implemented by each data-source adapter.
///
/// An adapter issues one outbound request, validates the payload against
/// its own minimum-structure requirement, and produces a normalized
/// [`StockQuote`]. Network failures, non-200 responses and parse failures
/// are returned as errors; they never panic and never abort the chain.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "SINA" or "EASTMONEY", used for logging and
    /// as the `source` field of produced quotes.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering. Lower values are tried first.
    fn priority(&self) -> u8 {
        10
    }

    /// Fetch the latest quote for a ticker.
    ///
    /// The market has already been resolved by the caller; the adapter
    /// only applies its own routing convention (prefix, secid, symbol).
    async fn latest_quote(
        &self,
        ticker: &str,
        market: Market,
    ) -> Result<StockQuote, MarketDataError>;
}
