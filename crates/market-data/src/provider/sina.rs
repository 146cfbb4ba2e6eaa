//! Sina Finance quote provider.
//!
//! Sina serves a comma-delimited plain-text line per ticker:
//!
//! ```text
//! var hq_str_sh600036="招商银行,42.50,42.00,42.60,...";
//! ```
//!
//! The literal between the two quotation marks carries at least 32
//! positional fields for a live instrument; anything shorter is treated as
//! no data. The response body is GBK-encoded and the endpoint advertises
//! the charset, so `Response::text` decodes it.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::prelude::*;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::headers::sina_headers;
use crate::provider::{QuoteProvider, REQUEST_TIMEOUT_SECS};
use crate::resolver::Market;

use async_trait::async_trait;

const BASE_URL: &str = "https://hq.sinajs.cn";
const PROVIDER_ID: &str = "SINA";

/// Marker that distinguishes a quote payload from an error page.
const PAYLOAD_MARKER: &str = "var hq_str";

/// Minimum positional fields for a structurally valid payload.
const MIN_FIELDS: usize = 32;

// Positional layout documented by the provider.
const FIELD_NAME: usize = 0;
const FIELD_OPEN: usize = 1;
const FIELD_PREVIOUS_CLOSE: usize = 2;
const FIELD_CURRENT: usize = 3;
const FIELD_HIGH: usize = 4;
const FIELD_LOW: usize = 5;
const FIELD_VOLUME: usize = 8;
const FIELD_AMOUNT: usize = 9;
const FIELD_DATE: usize = 30;
const FIELD_TIME: usize = 31;

/// Sina Finance quote provider (plain-text list endpoint).
#[derive(Clone)]
pub struct SinaProvider {
    client: Client,
}

impl SinaProvider {
    /// Create a new Sina provider.
    pub fn new() -> Self {
        let client = Client::builder()
            .default_headers(sina_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch(&self, ticker: &str, market: Market) -> Result<String, MarketDataError> {
        let url = format!(
            "{}/list={}{}",
            BASE_URL,
            market.quote_list_prefix(),
            ticker
        );

        debug!("Sina request: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
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
impl QuoteProvider for SinaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn latest_quote(
        &self,
        ticker: &str,
        market: Market,
    ) -> Result<StockQuote, MarketDataError> {
        let body = self.fetch(ticker, market).await?;
        parse_list_payload(&body)
    }
}

impl Default for SinaProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the raw list payload into a normalized quote.
///
/// Validation: the body must contain the `var hq_str` marker, and the
/// quoted literal must split into at least 32 comma-delimited fields.
fn parse_list_payload(body: &str) -> Result<StockQuote, MarketDataError> {
    if !body.contains(PAYLOAD_MARKER) {
        return Err(MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: "missing quote marker".to_string(),
        });
    }

    let content = body
        .split('"')
        .nth(1)
        .ok_or_else(|| MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: "missing quoted payload".to_string(),
        })?;

    let fields: Vec<&str> = content.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(MarketDataError::InvalidPayload {
            provider: PROVIDER_ID.to_string(),
            message: format!("expected at least {} fields, got {}", MIN_FIELDS, fields.len()),
        });
    }

    Ok(StockQuote {
        source: PROVIDER_ID.to_string(),
        name: fields[FIELD_NAME].to_string(),
        code: None,
        open: field_decimal(&fields, FIELD_OPEN),
        previous_close: field_decimal(&fields, FIELD_PREVIOUS_CLOSE),
        current: field_decimal(&fields, FIELD_CURRENT),
        high: field_decimal(&fields, FIELD_HIGH),
        low: field_decimal(&fields, FIELD_LOW),
        volume: field_decimal(&fields, FIELD_VOLUME)
            .trunc()
            .to_i64()
            .unwrap_or(0),
        amount: field_decimal(&fields, FIELD_AMOUNT),
        change_percent: None,
        timestamp: format!("{} {}", fields[FIELD_DATE], fields[FIELD_TIME]),
    })
}

/// Parse a positional field as a decimal; empty or malformed fields are 0.
fn field_decimal(fields: &[&str], index: usize) -> Decimal {
    fields
        .get(index)
        .and_then(|f| f.parse::<Decimal>().ok())
        .unwrap_or_default()
}
