//! Provider registry for orchestrating quote providers.
//!
//! The registry owns the ordered provider chain and implements the
//! fallback contract: providers are tried strictly in priority order, the
//! first structurally valid quote wins, and the remaining providers are
//! not attempted. A fixed advisory delay separates attempts to stay
//! polite with the upstream endpoints.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::{
    eastmoney::EastmoneyProvider, sina::SinaProvider, xueqiu::XueqiuProvider, QuoteProvider,
};
use crate::resolver::Market;

/// Registry tuning knobs.
///
/// The inter-attempt delay is advisory rate limiting, not a correctness
/// mechanism.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Sleep between adapter attempts after a failure.
    pub attempt_delay: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            attempt_delay: Duration::from_millis(500),
        }
    }
}

/// Priority-ordered fallback over quote providers.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn QuoteProvider>>,
    config: RegistryConfig,
}

impl ProviderRegistry {
    /// Create a registry over the given providers.
    ///
    /// Providers are sorted by [`QuoteProvider::priority`] once at
    /// construction; lower values are tried first.
    pub fn new(mut providers: Vec<Arc<dyn QuoteProvider>>, config: RegistryConfig) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self { providers, config }
    }

    /// Create a registry with the standard Sina → Eastmoney → Xueqiu chain.
    pub fn with_default_providers(config: RegistryConfig) -> Self {
        Self::new(
            vec![
                Arc::new(SinaProvider::new()),
                Arc::new(EastmoneyProvider::new()),
                Arc::new(XueqiuProvider::new()),
            ],
            config,
        )
    }

    /// Fetch the latest quote for a ticker.
    ///
    /// Resolves the market once, then walks the provider chain. Adapter
    /// failures are logged and recovered here; the only error surfaced to
    /// the caller is [`MarketDataError::AllProvidersFailed`] once the
    /// chain is exhausted.
    pub async fn latest_quote(&self, ticker: &str) -> Result<StockQuote, MarketDataError> {
        let market = Market::resolve(ticker);

        for (attempt, provider) in self.providers.iter().enumerate() {
            if attempt > 0 {
                tokio::time::sleep(self.config.attempt_delay).await;
            }

            match provider.latest_quote(ticker, market).await {
                Ok(quote) => {
                    info!(
                        "Fetched {} from '{}' at {}",
                        ticker,
                        provider.id(),
                        quote.current
                    );
                    return Ok(quote);
                }
                Err(e) => {
                    warn!(
                        "Provider '{}' failed for {}: {}. Trying next.",
                        provider.id(),
                        ticker,
                        e
                    );
                }
            }
        }

        Err(MarketDataError::AllProvidersFailed)
    }

    /// The registered providers, in attempt order.
    pub fn providers(&self) -> &[Arc<dyn QuoteProvider>] {
        &self.providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct MockProvider {
        id: &'static str,
        priority: u8,
        call_count: AtomicUsize,
        should_fail: bool,
    }

    impl MockProvider {
        fn new(id: &'static str, priority: u8, should_fail: bool) -> Arc<Self> {
            Arc::new(Self {
                id,
                priority,
                call_count: AtomicUsize::new(0),
                should_fail,
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for MockProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        async fn latest_quote(
            &self,
            ticker: &str,
            _market: Market,
        ) -> Result<StockQuote, MarketDataError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if self.should_fail {
                Err(MarketDataError::ProviderError {
                    provider: self.id.to_string(),
                    message: "Mock failure".to_string(),
                })
            } else {
                Ok(StockQuote {
                    source: self.id.to_string(),
                    name: "测试".to_string(),
                    code: Some(ticker.to_string()),
                    open: dec!(100),
                    previous_close: dec!(99),
                    current: dec!(102),
                    high: dec!(105),
                    low: dec!(95),
                    volume: 1000,
                    amount: dec!(102000),
                    change_percent: None,
                    timestamp: "2025-06-02 15:00:00".to_string(),
                })
            }
        }
    }

    fn no_delay() -> RegistryConfig {
        RegistryConfig {
            attempt_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_providers_sorted_by_priority() {
        let registry = ProviderRegistry::new(
            vec![
                MockProvider::new("LOW_PRIORITY", 20, false),
                MockProvider::new("HIGH_PRIORITY", 5, false),
                MockProvider::new("MED_PRIORITY", 10, false),
            ],
            no_delay(),
        );

        let ids: Vec<_> = registry.providers().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["HIGH_PRIORITY", "MED_PRIORITY", "LOW_PRIORITY"]);
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = MockProvider::new("FIRST", 1, false);
        let second = MockProvider::new("SECOND", 2, true);
        let third = MockProvider::new("THIRD", 3, true);

        let registry = ProviderRegistry::new(
            vec![first.clone(), second.clone(), third.clone()],
            no_delay(),
        );

        let quote = registry.latest_quote("600036").await.unwrap();

        assert_eq!(quote.source, "FIRST");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
        assert_eq!(third.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_to_second_provider() {
        let first = MockProvider::new("FIRST", 1, true);
        let second = MockProvider::new("SECOND", 2, false);

        let registry = ProviderRegistry::new(vec![first.clone(), second.clone()], no_delay());

        let quote = registry.latest_quote("600036").await.unwrap();

        assert_eq!(quote.source, "SECOND");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_fails() {
        let providers: Vec<Arc<MockProvider>> = vec![
            MockProvider::new("A", 1, true),
            MockProvider::new("B", 2, true),
            MockProvider::new("C", 3, true),
        ];

        let registry = ProviderRegistry::new(
            providers.iter().map(|p| p.clone() as Arc<dyn QuoteProvider>).collect(),
            no_delay(),
        );

        let err = registry.latest_quote("999999").await.unwrap_err();
        assert!(matches!(err, MarketDataError::AllProvidersFailed));
        for provider in &providers {
            assert_eq!(provider.calls(), 1);
        }
    }
}
