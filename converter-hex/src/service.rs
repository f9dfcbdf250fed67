//! Conversion Application Service
//!
//! Orchestrates validation, the rate provider and the conversion store.
//! Contains NO infrastructure logic - pure orchestration over the ports.

use chrono::Utc;
use opentelemetry::{
    global,
    metrics::{Counter, Meter},
};

use converter_types::domain::{convert as apply_rate, decimal_to_f64};
use converter_types::{
    AppError, ConversionRecord, ConversionRepository, ConversionResult, ConvertRequest,
    CurrencyCode, DomainError, HistoryPage, HistoryQuery, NewConversion, PageRequest, Pagination,
    RateProvider,
};

/// Client-facing messages for server faults; the cause is only logged.
pub const CONVERT_FAILED: &str = "Failed to convert currency. Please try again.";
pub const CURRENCIES_FAILED: &str = "Failed to fetch available currencies";
pub const HISTORY_FAILED: &str = "Failed to fetch conversion history";
pub const CONVERSIONS_FAILED: &str = "Failed to fetch conversions";

/// Application service for currency conversion.
///
/// Generic over both ports so adapters are injected at compile time:
/// SQLite or Postgres for `R`, the HTTP client or a test double for `P`.
pub struct ConversionService<R: ConversionRepository, P: RateProvider> {
    repo: R,
    rates: P,
    persist_failures: Counter<u64>,
}

impl<R: ConversionRepository, P: RateProvider> ConversionService<R, P> {
    /// Creates a new conversion service reporting to the global meter.
    pub fn new(repo: R, rates: P) -> Self {
        Self::with_meter(repo, rates, &global::meter("converter-hex"))
    }

    /// Creates a new conversion service reporting to `meter`.
    pub fn with_meter(repo: R, rates: P, meter: &Meter) -> Self {
        let persist_failures = meter
            .u64_counter("conversion_persist_failures")
            .with_description("Conversions returned to the caller but not recorded")
            .build();

        Self {
            repo,
            rates,
            persist_failures,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying rate provider.
    pub fn rates(&self) -> &P {
        &self.rates
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currencies
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the currencies the rate provider supports.
    pub async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, AppError> {
        self.rates
            .list_currencies()
            .await
            .map_err(|e| AppError::internal(CURRENCIES_FAILED, e))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts an amount and records it.
    ///
    /// Validation failures return before any remote call. A failed store
    /// write is logged and counted but never fails the conversion.
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConversionResult, AppError> {
        let input = req.validate()?;

        let rate = self
            .rates
            .get_rate(&input.source_currency, &input.target_currency)
            .await
            .map_err(|e| AppError::internal(CONVERT_FAILED, e))?;

        let converted = apply_rate(input.amount, rate).map_err(|e| match e {
            DomainError::AmountOverflow => AppError::from(e),
            other => AppError::internal(CONVERT_FAILED, other),
        })?;

        let result = ConversionResult {
            source_currency: input.source_currency,
            target_currency: input.target_currency,
            amount: input.amount.to_f64(),
            converted_amount: decimal_to_f64(converted),
            exchange_rate: rate,
            timestamp: Utc::now(),
        };

        let new = NewConversion {
            source_currency: result.source_currency.clone(),
            target_currency: result.target_currency.clone(),
            amount: result.amount,
            converted_amount: result.converted_amount,
            exchange_rate: result.exchange_rate,
        };

        match self.repo.record_conversion(new).await {
            Ok(record) => {
                tracing::debug!(id = %record.id, "Conversion recorded");
            }
            Err(e) => {
                self.persist_failures.add(1, &[]);
                tracing::warn!(
                    error = %e,
                    source_currency = %result.source_currency,
                    target_currency = %result.target_currency,
                    amount = result.amount,
                    "Failed to record conversion, returning result anyway"
                );
            }
        }

        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns one page of history, newest first.
    pub async fn history(&self, query: HistoryQuery) -> Result<HistoryPage, AppError> {
        let page = PageRequest::from_query(&query);

        let conversions = self
            .repo
            .list_recent(page.limit, page.offset)
            .await
            .map_err(|e| AppError::internal(HISTORY_FAILED, e))?;

        let total = self
            .repo
            .count_conversions()
            .await
            .map_err(|e| AppError::internal(HISTORY_FAILED, e))?;

        Ok(HistoryPage {
            conversions,
            pagination: Pagination::new(page, total),
        })
    }

    /// Returns every recorded conversion.
    pub async fn list_conversions(&self) -> Result<Vec<ConversionRecord>, AppError> {
        self.repo
            .list_all()
            .await
            .map_err(|e| AppError::internal(CONVERSIONS_FAILED, e))
    }
}
