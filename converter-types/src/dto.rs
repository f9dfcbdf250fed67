//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Amount, ConversionInput, ConversionRecord, CurrencyCode};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope: `{ "success": false, "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    #[schema(example = "Amount must be a positive number")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
///
/// Fields are kept untyped so that missing and malformed values can be
/// reported with the same messages regardless of their JSON shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "USD")]
    pub source_currency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "EUR")]
    pub target_currency: Option<Value>,
    /// A JSON number or a numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>, example = 100)]
    pub amount: Option<Value>,
}

impl ConvertRequest {
    pub fn new(source: &str, target: &str, amount: f64) -> Self {
        Self {
            source_currency: Some(Value::from(source)),
            target_currency: Some(Value::from(target)),
            amount: Some(Value::from(amount)),
        }
    }

    /// Checks presence of every field, then the amount.
    pub fn validate(&self) -> Result<ConversionInput, DomainError> {
        let (Some(source), Some(target), Some(amount)) = (
            non_blank_text(&self.source_currency),
            non_blank_text(&self.target_currency),
            self.amount.as_ref().filter(|v| is_present(v)),
        ) else {
            return Err(DomainError::MissingFields);
        };

        let amount = match amount {
            Value::Number(n) => Amount::parse(&n.to_string())?,
            Value::String(s) => Amount::parse(s)?,
            _ => return Err(DomainError::InvalidAmount),
        };

        Ok(ConversionInput {
            source_currency: source.to_string(),
            target_currency: target.to_string(),
            amount,
        })
    }
}

fn non_blank_text(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim()),
        _ => None,
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
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
    /// When the result was produced (not the stored timestamp)
    pub timestamp: DateTime<Utc>,
}

/// Response listing the supported currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyListResponse {
    pub success: bool,
    pub currencies: Vec<CurrencyCode>,
}

impl CurrencyListResponse {
    pub fn ok(currencies: Vec<CurrencyCode>) -> Self {
        Self {
            success: true,
            currencies,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Raw history query string; values that do not parse fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Page size (default 10, at most 100)
    pub limit: Option<String>,
    /// Number of records to skip (default 0)
    pub offset: Option<String>,
}

/// Effective, bounded pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Parses a query; a zero or invalid limit means the default.
    pub fn from_query(query: &HistoryQuery) -> Self {
        let limit = query
            .limit
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);

        let offset = query
            .offset
            .as_deref()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self { limit, offset }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Pagination metadata for a history page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[schema(example = 42)]
    pub total: u64,
    #[schema(example = 10)]
    pub limit: u32,
    #[schema(example = 0)]
    pub offset: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: PageRequest, total: u64) -> Self {
        Self {
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.offset.saturating_add(u64::from(page.limit)) < total,
        }
    }
}

/// One page of conversion history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryPage {
    pub conversions: Vec<ConversionRecord>,
    pub pagination: Pagination,
}
