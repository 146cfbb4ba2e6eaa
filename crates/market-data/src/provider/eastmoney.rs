//! Eastmoney quote provider.
//!
//! Eastmoney's push API keys instruments by a "secid": a numeric market
//! prefix (1 = Shanghai, 0 = Shenzhen) joined to the ticker, e.g.
//! `1.600036`. Prices come back in hundredths of a yuan and turnover in
//! units of 10,000 yuan, so the adapter rescales into natural units before
//! they reach the shared model.

use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use rust_decimal::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::headers::eastmoney_headers;
use crate::provider::{QuoteProvider, REQUEST_TIMEOUT_SECS};
use crate::resolver::Market;

use async_trait::async_trait;

const BASE_URL: &str = "https://push2.eastmoney.com";
const PROVIDER_ID: &str = "EASTMONEY";

/// Fields requested from the push API.
///
/// f43 current, f44 high, f45 low, f46 open, f47 volume, f48 amount,
/// f57 code, f58 name, f60 previous close, f170 change percent.
const FIELDS: &str = "f43,f44,f45,f46,f47,f48,f57,f58,f60,f170";

/// Prices are reported in hundredths of a yuan.
const PRICE_DIVISOR: i64 = 100;

/// Turnover is reported in units of 10,000 yuan.
const AMOUNT_DIVISOR: i64 = 10_000;

// ============================================================================
// API Response Structures
// ============================================================================

/// Response envelope from /api/qt/stock/get
#[derive(Debug, Deserialize)]
struct StockGetResponse {
    /// Quote payload; null for unknown secids
    data: Option<StockData>,
}

/// Quote payload keyed by Eastmoney field codes
#[derive(Debug, Deserialize)]
struct StockData {
    /// Current price (scaled)
    f43: Option<f64>,
    /// High (scaled)
    f44: Option<f64>,
    /// Low (scaled)
    f45: Option<f64>,
    /// Open (scaled)
    f46: Option<f64>,
    /// Volume
    f47: Option<i64>,
    /// Turnover (scaled)
    f48: Option<f64>,
    /// Ticker
    f57: Option<String>,
    /// Display name
    f58: Option<String>,
    /// Previous close (scaled)
    f60: Option<f64>,
    /// Change percent (scaled)
    f170: Option<f64>,
}

// ============================================================================
// EastmoneyProvider
// ============================================================================

/// Eastmoney quote provider (JSON push API).
#[derive(Clone)]
pub struct EastmoneyProvider {
    client: Client,
}

impl EastmoneyProvider {
    /// Create a new Eastmoney provider.
    pub fn new() -> Self {
        let client = Client::builder()
            .default_headers(eastmoney_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch(&self, ticker: &str, market: Market) -> Result<String, MarketDataError> {
        let url = format!("{}/api/qt/stock/get", BASE_URL);
        let secid = format!("{}.{}", market.secid_prefix(), ticker);

        debug!("Eastmoney request: secid={}", secid);

        let response = self
            .client
            .get(&url)
            .query(&[("secid", secid.as_str()), ("fields", FIELDS)])
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
impl QuoteProvider for EastmoneyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    async fn latest_quote(
        &self,
        ticker: &str,
        market: Market,
    ) -> Result<StockQuote, MarketDataError> {
        let body = self.fetch(ticker, market).await?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        parse_stock_get(&body, timestamp)
    }
}

impl Default for EastmoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a push-API body into a normalized quote.
///
/// Validation: the decoded JSON must contain a non-null `data` object.
/// Within it, any missing scaled field defaults to 0 rather than failing
/// the whole parse.
fn parse_stock_get(body: &str, timestamp: String) -> Result<StockQuote, MarketDataError> {
    let response: StockGetResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to decode response: {}", e),
        })?;

    let data = response.data.ok_or_else(|| MarketDataError::InvalidPayload {
        provider: PROVIDER_ID.to_string(),
        message: "missing data object".to_string(),
    })?;

    Ok(StockQuote {
        source: PROVIDER_ID.to_string(),
        name: data.f58.unwrap_or_default(),
        code: data.f57,
        open: scaled(data.f46, PRICE_DIVISOR),
        previous_close: scaled(data.f60, PRICE_DIVISOR),
        current: scaled(data.f43, PRICE_DIVISOR),
        high: scaled(data.f44, PRICE_DIVISOR),
        low: scaled(data.f45, PRICE_DIVISOR),
        volume: data.f47.unwrap_or(0),
        amount: scaled(data.f48, AMOUNT_DIVISOR),
        change_percent: data.f170.map(|v| scaled(Some(v), PRICE_DIVISOR)),
        timestamp,
    })
}

/// Rescale a provider field into natural units; missing fields are 0.
fn scaled(value: Option<f64>, divisor: i64) -> Decimal {
    value
        .and_then(Decimal::from_f64)
        .map(|v| v / Decimal::from(divisor))
        .unwrap_or_default()
}
