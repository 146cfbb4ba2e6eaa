//! Exchange inference from the ticker's leading digit.

/// Exchange an A-share instrument trades on.
///
/// Resolved once per ticker and carried through the provider chain. Each
/// variant knows the routing tokens the individual providers expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Market {
    /// Shanghai Stock Exchange
    Sh,
    /// Shenzhen Stock Exchange
    Sz,
}

impl Market {
    /// Infer the market from a ticker's leading character.
    ///
    /// `'6'` is Shanghai; `'0'` and `'3'` are Shenzhen. Any other leading
    /// character (or an empty ticker) falls back to the Shanghai routing
    /// values. Total and deterministic.
    pub fn resolve(ticker: &str) -> Self {
        match ticker.chars().next() {
            Some('0') | Some('3') => Market::Sz,
            _ => Market::Sh,
        }
    }

    /// Lowercase exchange prefix used by the Sina list endpoint ("sh"/"sz").
    pub fn quote_list_prefix(&self) -> &'static str {
        match self {
            Market::Sh => "sh",
            Market::Sz => "sz",
        }
    }

    /// Numeric routing prefix used in Eastmoney secids (1 = SH, 0 = SZ).
    pub fn secid_prefix(&self) -> u8 {
        match self {
            Market::Sh => 1,
            Market::Sz => 0,
        }
    }

    /// Uppercase symbol prefix used by the Xueqiu quote endpoint.
    pub fn exchange_token(&self) -> &'static str {
        match self {
            Market::Sh => "SH",
            Market::Sz => "SZ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shanghai_tickers() {
        let market = Market::resolve("600036");
        assert_eq!(market, Market::Sh);
        assert_eq!(market.quote_list_prefix(), "sh");
        assert_eq!(market.secid_prefix(), 1);
        assert_eq!(market.exchange_token(), "SH");
    }

    #[test]
    fn test_shenzhen_tickers() {
        for ticker in ["000001", "300750"] {
            let market = Market::resolve(ticker);
            assert_eq!(market, Market::Sz);
            assert_eq!(market.quote_list_prefix(), "sz");
            assert_eq!(market.secid_prefix(), 0);
            assert_eq!(market.exchange_token(), "SZ");
        }
    }

    #[test]
    fn test_unknown_leading_character_defaults_to_shanghai() {
        for ticker in ["999999", "5", "ABC", ""] {
            let market = Market::resolve(ticker);
            assert_eq!(market, Market::Sh);
            assert_eq!(market.secid_prefix(), 1);
            assert_eq!(market.exchange_token(), "SH");
        }
    }
}
