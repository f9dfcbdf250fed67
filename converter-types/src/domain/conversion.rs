//! Conversion records and related domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::Amount;

/// Store-assigned identifier for a ConversionRecord.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ConversionId(i64);

impl ConversionId {
    /// Wraps a raw surrogate key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw surrogate key.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded currency conversion.
///
/// Records are immutable once written; the store owns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: ConversionId,
    #[schema(example = "USD")]
    pub source_currency: String,
    #[schema(example = "EUR")]
    pub target_currency: String,
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(example = 92.15)]
    pub converted_amount: f64,
    #[schema(example = 0.9215)]
    pub exchange_rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// Business fields of a conversion, before the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversion {
    pub source_currency: String,
    pub target_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
}

impl NewConversion {
    /// Attaches the store-assigned identity.
    pub fn into_record(self, id: ConversionId, timestamp: DateTime<Utc>) -> ConversionRecord {
        ConversionRecord {
            id,
            source_currency: self.source_currency,
            target_currency: self.target_currency,
            amount: self.amount,
            converted_amount: self.converted_amount,
            exchange_rate: self.exchange_rate,
            timestamp,
        }
    }
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionInput {
    pub source_currency: String,
    pub target_currency: String,
    pub amount: Amount,
}

/// A currency supported by the rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyCode {
    #[schema(example = "USD")]
    pub code: String,
    #[schema(example = "United States Dollar")]
    pub name: String,
}

impl CurrencyCode {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
