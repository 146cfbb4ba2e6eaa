//! The monitoring pass: sequential per-ticker fetch, report and push.

use quotewatch_market_data::ProviderRegistry;
use tracing::{info, warn};

use crate::config::Config;
use crate::notify::Notify;
use crate::report;

/// Outcome tally of one monitoring pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success: usize,
    pub failure: usize,
}

/// Process every configured ticker, in input order.
///
/// Each ticker is fully completed (fetch, report, push) before the next
/// begins. A failed fetch or a failed push never aborts the run; only the
/// fetch outcome feeds the tally.
pub async fn run(registry: &ProviderRegistry, notifier: &dyn Notify, config: &Config) -> RunSummary {
    let mut summary = RunSummary::default();

    for (index, ticker) in config.tickers.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(config.ticker_delay).await;
        }

        match registry.latest_quote(ticker).await {
            Ok(quote) => {
                summary.success += 1;

                let message = report::format_report(&quote, ticker);
                println!("{}", message);

                let title = report::push_title(&quote, ticker);
                match notifier.push(&title, &message).await {
                    Ok(()) => info!("Push delivered for {}", ticker),
                    Err(e) => warn!("Push failed for {}: {:#}", ticker, e),
                }
            }
            Err(e) => {
                summary.failure += 1;
                println!("❌ {}: {}", ticker, e);
            }
        }
    }

    println!(
        "Done. success: {}, fail: {}",
        summary.success, summary.failure
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quotewatch_market_data::{
        Market, MarketDataError, QuoteProvider, RegistryConfig, StockQuote,
    };
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct StaticProvider {
        /// Tickers this provider answers for; everything else fails.
        known: Vec<&'static str>,
    }

    #[async_trait]
    impl QuoteProvider for StaticProvider {
        fn id(&self) -> &'static str {
            "STATIC"
        }

        fn priority(&self) -> u8 {
            1
        }

        async fn latest_quote(
            &self,
            ticker: &str,
            market: Market,
        ) -> Result<StockQuote, MarketDataError> {
            if !self.known.contains(&ticker) {
                return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
            }
            Ok(StockQuote {
                source: "STATIC".to_string(),
                name: "测试".to_string(),
                code: Some(format!("{}{}", market.exchange_token(), ticker)),
                open: dec!(10.00),
                previous_close: dec!(10.00),
                current: dec!(10.10),
                high: dec!(10.20),
                low: dec!(9.90),
                volume: 1000,
                amount: dec!(10100),
                change_percent: None,
                timestamp: "2025-06-02 15:00:00".to_string(),
            })
        }
    }

    struct RecordingNotifier {
        pushes: AtomicUsize,
    }

    #[async_trait]
    impl Notify for RecordingNotifier {
        async fn push(&self, _title: &str, _message: &str) -> anyhow::Result<()> {
            self.pushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_config(tickers: &[&str]) -> Config {
        Config {
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
            bark_url: "http://localhost/".to_string(),
            attempt_delay: Duration::ZERO,
            ticker_delay: Duration::ZERO,
        }
    }

    fn test_registry(known: Vec<&'static str>) -> ProviderRegistry {
        ProviderRegistry::new(
            vec![Arc::new(StaticProvider { known })],
            RegistryConfig {
                attempt_delay: Duration::ZERO,
            },
        )
    }

    #[tokio::test]
    async fn test_all_tickers_succeed() {
        let registry = test_registry(vec!["600036", "000001"]);
        let notifier = RecordingNotifier {
            pushes: AtomicUsize::new(0),
        };
        let config = test_config(&["600036", "000001"]);

        let summary = run(&registry, &notifier, &config).await;

        assert_eq!(
            summary,
            RunSummary {
                success: 2,
                failure: 0
            }
        );
        assert_eq!(notifier.pushes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_one_ticker_fails_without_aborting() {
        let registry = test_registry(vec!["600036"]);
        let notifier = RecordingNotifier {
            pushes: AtomicUsize::new(0),
        };
        // The failing ticker comes first; the run must still reach the next one
        let config = test_config(&["999999", "600036"]);

        let summary = run(&registry, &notifier, &config).await;

        assert_eq!(
            summary,
            RunSummary {
                success: 1,
                failure: 1
            }
        );
        assert_eq!(notifier.pushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_push_failure_does_not_affect_tally() {
        struct FailingNotifier;

        #[async_trait]
        impl Notify for FailingNotifier {
            async fn push(&self, _title: &str, _message: &str) -> anyhow::Result<()> {
                anyhow::bail!("relay unreachable")
            }
        }

        let registry = test_registry(vec!["600036"]);
        let config = test_config(&["600036"]);

        let summary = run(&registry, &FailingNotifier, &config).await;

        assert_eq!(
            summary,
            RunSummary {
                success: 1,
                failure: 0
            }
        );
    }
}
