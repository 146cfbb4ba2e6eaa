use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized snapshot of an instrument's current trading state.
///
/// Every adapter converges on this shape. Price fields always hold a value
/// (0 when the provider omitted the field) so downstream arithmetic never
/// deals with absence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockQuote {
    /// Provider that produced the quote (SINA, EASTMONEY, XUEQIU)
    pub source: String,

    /// Display name of the instrument (may be empty if the provider omits it)
    pub name: String,

    /// Provider-reported ticker; consumers fall back to the requested
    /// ticker when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Opening price
    pub open: Decimal,

    /// Previous session's closing price
    pub previous_close: Decimal,

    /// Latest traded price
    pub current: Decimal,

    /// Session high
    pub high: Decimal,

    /// Session low
    pub low: Decimal,

    /// Shares/lots traded
    pub volume: i64,

    /// Currency turnover
    pub amount: Decimal,

    /// Provider-supplied change percent; recomputed from prices when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,

    /// Free-form quote time, provider-supplied or defaulted to fetch time
    pub timestamp: String,
}

impl StockQuote {
    /// Absolute change against the previous close.
    pub fn change(&self) -> Decimal {
        self.current - self.previous_close
    }

    /// Change percent, preferring the provider-supplied value.
    ///
    /// When the provider did not report one, recomputes
    /// `(current - previous_close) / previous_close * 100`. A previous
    /// close of 0 (new listing) yields exactly 0%.
    pub fn change_percent_or_computed(&self) -> Decimal {
        match self.change_percent {
            Some(pct) => pct,
            None => {
                if self.previous_close.is_zero() {
                    Decimal::ZERO
                } else {
                    self.change() / self.previous_close * Decimal::ONE_HUNDRED
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(current: Decimal, previous_close: Decimal) -> StockQuote {
        StockQuote {
            source: "SINA".to_string(),
            name: "招商银行".to_string(),
            code: None,
            open: dec!(42.10),
            previous_close,
            current,
            high: dec!(42.80),
            low: dec!(41.95),
            volume: 12_345_678,
            amount: dec!(523456789.12),
            change_percent: None,
            timestamp: "2025-06-02 15:00:00".to_string(),
        }
    }

    #[test]
    fn test_change() {
        let q = quote(dec!(42.50), dec!(42.00));
        assert_eq!(q.change(), dec!(0.50));
    }

    #[test]
    fn test_change_percent_computed() {
        let q = quote(dec!(42.50), dec!(42.00));
        assert_eq!(q.change_percent_or_computed().round_dp(2), dec!(1.19));
    }

    #[test]
    fn test_change_percent_prefers_provider_value() {
        let mut q = quote(dec!(42.50), dec!(42.00));
        q.change_percent = Some(dec!(1.25));
        assert_eq!(q.change_percent_or_computed(), dec!(1.25));
    }

    #[test]
    fn test_zero_previous_close_yields_zero_percent() {
        let q = quote(dec!(10.00), Decimal::ZERO);
        assert_eq!(q.change_percent_or_computed(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_change() {
        let q = quote(dec!(41.50), dec!(42.00));
        assert_eq!(q.change(), dec!(-0.50));
        assert!(q.change_percent_or_computed() < Decimal::ZERO);
    }
}
