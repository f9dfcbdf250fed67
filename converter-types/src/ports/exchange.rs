//! Exchange rate provider port.
//!
//! Implementations can be HTTP clients, fixed-rate tables for tests, etc.

use std::sync::Arc;

use crate::CurrencyCode;

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Request to rate provider failed: {0}")]
    Transport(String),

    #[error("Rate provider responded with HTTP {0}")]
    Status(u16),

    #[error("Rate provider rejected the request: {0}")]
    Rejected(String),

    #[error("Unexpected rate provider response: {0}")]
    Decode(String),

    #[error("Rate provider returned an invalid rate: {0}")]
    InvalidRate(f64),
}

/// Port trait for exchange rate providers.
///
/// Each call is a single round trip; implementations must not retry.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Lists every currency the provider can quote.
    async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, ExchangeError>;

    /// Returns how many units of `target` one unit of `source` buys.
    async fn get_rate(&self, source: &str, target: &str) -> Result<f64, ExchangeError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, ExchangeError> {
        (**self).list_currencies().await
    }

    async fn get_rate(&self, source: &str, target: &str) -> Result<f64, ExchangeError> {
        (**self).get_rate(source, target).await
    }
}
