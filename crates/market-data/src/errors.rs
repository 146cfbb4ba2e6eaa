//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during quote acquisition.
///
/// Adapter-level failures are recovered by the registry, which logs them
/// and moves on to the next provider in the chain.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested ticker was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-200 status, upstream error
    /// body). Try the next provider in the chain.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider responded, but the payload did not meet the adapter's
    /// minimum-structure requirement. A partially parsed payload is never
    /// surfaced as a quote.
    #[error("Invalid payload from {provider}: {message}")]
    InvalidPayload {
        /// The provider whose payload failed validation
        provider: String,
        /// Description of the structural failure
        message: String,
    },

    /// Every provider in the chain was tried and all failed.
    #[error("All providers failed")]
    AllProvidersFailed,

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("999999".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: 999999");

        let error = MarketDataError::Timeout {
            provider: "SINA".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: SINA");

        let error = MarketDataError::InvalidPayload {
            provider: "SINA".to_string(),
            message: "expected at least 32 fields, got 5".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Invalid payload from SINA: expected at least 32 fields, got 5"
        );
    }

    #[test]
    fn test_all_providers_failed_display() {
        assert_eq!(
            format!("{}", MarketDataError::AllProvidersFailed),
            "All providers failed"
        );
    }
}
