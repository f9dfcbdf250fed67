//! ExchangeRate-API v6 client.
//!
//! Implements the [`RateProvider`] port over HTTP. Two endpoints are used:
//!
//! - `GET {base}/{key}/codes` - supported currency codes
//! - `GET {base}/{key}/pair/{source}/{target}` - a single conversion rate
//!
//! Every call is exactly one round trip bounded by the configured timeout.
//! There is no caching and no retry.
//!
//! # Example
//! ```no_run
//! use exchange_rates::{ExchangeRateApiClient, ProviderConfig};
//! use converter_types::RateProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ExchangeRateApiClient::new(ProviderConfig::new(
//!     ProviderConfig::DEFAULT_BASE_URL,
//!     "my-api-key",
//! ))?;
//! let rate = client.get_rate("USD", "EUR").await?;
//! println!("1 USD = {rate} EUR");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use converter_types::{CurrencyCode, ExchangeError, RateProvider};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Connection settings for the rate provider, injected at construction.
#[derive(Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://v6.exchangerate-api.com/v6";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Hand-written so the key never shows up in logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors raised while constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid rate provider base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Fields shared by every provider response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(flatten)]
    payload: T,
}

#[derive(Debug, Deserialize)]
struct CodesPayload {
    #[serde(default)]
    supported_codes: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct PairPayload {
    conversion_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP adapter for ExchangeRate-API.
pub struct ExchangeRateApiClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl ExchangeRateApiClient {
    /// Creates a client; the timeout applies to each whole request.
    pub fn new(config: ProviderConfig) -> Result<Self, ClientBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".into(),
            });
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("currency-converter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            http,
        })
    }

    /// Appends `{key}/{segments..}` to the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ExchangeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ExchangeError::Transport("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .push(&self.api_key)
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ExchangeError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(ErrorBody {
                    error_type: Some(kind),
                }) => ExchangeError::Rejected(kind),
                _ => ExchangeError::Status(status.as_u16()),
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ExchangeError::Decode(e.without_url().to_string()))?;

        if envelope.result != "success" {
            let kind = envelope
                .error_type
                .unwrap_or_else(|| format!("result \"{}\"", envelope.result));
            warn!(error_type = %kind, "Rate provider returned a failure result");
            return Err(ExchangeError::Rejected(kind));
        }

        Ok(envelope.payload)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    #[instrument(name = "RateProviderListCurrencies", skip(self))]
    async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, ExchangeError> {
        let url = self.endpoint(&["codes"])?;
        let payload: CodesPayload = self.fetch(url).await?;

        debug!(count = payload.supported_codes.len(), "Fetched supported codes");

        Ok(payload
            .supported_codes
            .into_iter()
            .map(|(code, name)| CurrencyCode { code, name })
            .collect())
    }

    #[instrument(name = "RateProviderGetRate", skip(self))]
    async fn get_rate(&self, source: &str, target: &str) -> Result<f64, ExchangeError> {
        let url = self.endpoint(&["pair", source, target])?;
        let payload: PairPayload = self.fetch(url).await?;

        let rate = payload
            .conversion_rate
            .ok_or_else(|| ExchangeError::Decode("missing conversion_rate".into()))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(ExchangeError::InvalidRate(rate));
        }

        debug!(rate, "Fetched conversion rate");
        Ok(rate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
