//! Xueqiu quote provider.
//!
//! Xueqiu keys instruments by an exchange-prefixed symbol (`SH600036`) and
//! returns a nested `data.quote` object with everything already in natural
//! units, so no rescaling is needed.

use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use rust_decimal::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::headers::xueqiu_headers;
use crate::provider::{QuoteProvider, REQUEST_TIMEOUT_SECS};
use crate::resolver::Market;

use async_trait::async_trait;

const BASE_URL: &str = "https://stock.xueqiu.com";
const PROVIDER_ID: &str = "XUEQIU";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response envelope from /v5/stock/quote.json
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Payload; absent or null on errors
    data: Option<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    /// The actual quote; absent for unknown symbols
    quote: Option<QuoteBody>,
}

/// Quote body, natural units throughout
#[derive(Debug, Deserialize)]
struct QuoteBody {
    /// Display name
    name: Option<String>,
    /// Exchange-prefixed symbol ("SH600036")
    symbol: Option<String>,
    /// Latest traded price
    current: Option<f64>,
    /// Opening price
    open: Option<f64>,
    /// Previous session's close
    last_close: Option<f64>,
    /// Session high
    high: Option<f64>,
    /// Session low
    low: Option<f64>,
    /// Shares traded
    volume: Option<i64>,
    /// Currency turnover
    amount: Option<f64>,
    /// Change percent
    percent: Option<f64>,
}

// ============================================================================
// XueqiuProvider
// ============================================================================

/// Xueqiu quote provider (JSON quote endpoint).
#[derive(Clone)]
pub struct XueqiuProvider {
    client: Client,
}

impl XueqiuProvider {
    /// Create a new Xueqiu provider.
    pub fn new() -> Self {
        let client = Client::builder()
            .default_headers(xueqiu_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch(&self, ticker: &str, market: Market) -> Result<String, MarketDataError> {
        let url = format!("{}/v5/stock/quote.json", BASE_URL);
        let symbol = format!("{}{}", market.exchange_token(), ticker);

        debug!("Xueqiu request: symbol={}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("extend", "detail")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

#[async_trait]
impl QuoteProvider for XueqiuProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn latest_quote(
        &self,
        ticker: &str,
        market: Market,
    ) -> Result<StockQuote, MarketDataError> {
        let body = self.fetch(ticker, market).await?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        parse_quote_body(&body, timestamp)
    }
}

impl Default for XueqiuProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a quote.json body into a normalized quote.
///
/// Validation: the decoded JSON must contain a `data.quote` object.
fn parse_quote_body(body: &str, timestamp: String) -> Result<StockQuote, MarketDataError> {
    let response: QuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to decode response: {}", e),
        })?;

    let quote = response
        .data
        .and_then(|d| d.quote)
        .ok_or_else(|| MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: "missing data.quote object".to_string(),
        })?;

    Ok(StockQuote {
        source: PROVIDER_ID.to_string(),
        name: quote.name.unwrap_or_default(),
        code: quote.symbol,
        open: natural(quote.open),
        previous_close: natural(quote.last_close),
        current: natural(quote.current),
        high: natural(quote.high),
        low: natural(quote.low),
        volume: quote.volume.unwrap_or(0),
        amount: natural(quote.amount),
        change_percent: quote.percent.and_then(Decimal::from_f64),
        timestamp,
    })
}

/// Convert a natural-unit field; missing fields are 0.
fn natural(value: Option<f64>) -> Decimal {
    value.and_then(Decimal::from_f64).unwrap_or_default()
}
