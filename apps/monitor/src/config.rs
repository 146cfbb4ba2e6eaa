use std::time::Duration;

/// Ticker monitored when neither the CLI option nor QW_TICKERS is set.
const DEFAULT_TICKER: &str = "600036";

/// Default push relay endpoint.
const DEFAULT_BARK_URL: &str = "http://notice.xmwefun.cn/";

pub struct Config {
    /// Tickers to process, in input order.
    pub tickers: Vec<String>,
    /// Push relay endpoint.
    pub bark_url: String,
    /// Sleep between adapter attempts within one ticker.
    pub attempt_delay: Duration,
    /// Sleep between tickers.
    pub ticker_delay: Duration,
}

impl Config {
    /// Resolve configuration from the CLI option and environment.
    ///
    /// The CLI ticker list takes precedence over QW_TICKERS. An input that
    /// yields no tickers at all is the only fatal configuration error.
    pub fn resolve(tickers_arg: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let raw = tickers_arg
            .or_else(|| std::env::var("QW_TICKERS").ok())
            .unwrap_or_else(|| DEFAULT_TICKER.to_string());
        let tickers = parse_tickers(&raw);
        if tickers.is_empty() {
            anyhow::bail!(
                "no tickers specified; pass --tickers 600036,000001 or set QW_TICKERS"
            );
        }

        let bark_url =
            std::env::var("QW_BARK_URL").unwrap_or_else(|_| DEFAULT_BARK_URL.to_string());
        let attempt_delay_ms: u64 = std::env::var("QW_ATTEMPT_DELAY_MS")
            .unwrap_or_else(|_| "500".into())
            .parse()
            .unwrap_or(500);
        let ticker_delay_ms: u64 = std::env::var("QW_TICKER_DELAY_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .unwrap_or(1000);

        Ok(Self {
            tickers,
            bark_url,
            attempt_delay: Duration::from_millis(attempt_delay_ms),
            ticker_delay: Duration::from_millis(ticker_delay_ms),
        })
    }
}

/// Split a comma-separated ticker list, discarding empty entries.
fn parse_tickers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tickers() {
        assert_eq!(parse_tickers("600036,000001"), vec!["600036", "000001"]);
    }

    #[test]
    fn test_parse_tickers_discards_empty_entries() {
        assert_eq!(parse_tickers("600036, ,,000001,"), vec!["600036", "000001"]);
        assert!(parse_tickers("").is_empty());
        assert!(parse_tickers(" , ,").is_empty());
    }

    #[test]
    fn test_parse_tickers_trims_whitespace() {
        assert_eq!(parse_tickers(" 600036 , 000001 "), vec!["600036", "000001"]);
    }
}
