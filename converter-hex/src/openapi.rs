//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::domain::{ConversionId, ConversionRecord, CurrencyCode};
use converter_types::dto::{
    ApiResponse, ConversionResult, ConvertRequest, CurrencyListResponse, ErrorResponse,
    HistoryPage, HistoryQuery, Pagination,
};
use utoipa::{OpenApi, ToSchema};

/// Body of `GET /conversions`.
#[derive(ToSchema)]
struct ConversionList {
    #[schema(example = true)]
    success: bool,
    data: Vec<ConversionRecord>,
}

// Dummy functions to generate path documentation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Currencies supported by the rate provider", body = CurrencyListResponse),
        (status = 500, description = "Rate provider unavailable", body = ErrorResponse)
    )
)]
async fn list_currencies() {}

/// Convert an amount between two currencies
#[utoipa::path(
    post,
    path = "/convert",
    tag = "conversions",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion result", body = ApiResponse<ConversionResult>),
        (status = 400, description = "Missing fields, invalid amount or malformed JSON", body = ErrorResponse),
        (status = 500, description = "Rate lookup failed", body = ErrorResponse)
    )
)]
async fn convert() {}

/// Paginated conversion history, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "conversions",
    params(HistoryQuery),
    responses(
        (status = 200, description = "One page of history", body = ApiResponse<HistoryPage>),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn history() {}

/// Every recorded conversion, newest first
#[utoipa::path(
    get,
    path = "/conversions",
    tag = "conversions",
    responses(
        (status = 200, description = "All conversions", body = ConversionList),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn list_conversions() {}

/// OpenAPI documentation for the Currency Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "0.1.0",
        description = "Converts amounts between currencies using live exchange rates and keeps a history of conversions.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        convert,
        history,
        list_conversions,
    ),
    components(
        schemas(
            ConvertRequest,
            ConversionResult,
            ConversionRecord,
            ConversionList,
            ConversionId,
            CurrencyCode,
            CurrencyListResponse,
            HistoryPage,
            Pagination,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Supported currency codes"),
        (name = "conversions", description = "Currency conversion and history"),
    )
)]
pub struct ApiDoc;
