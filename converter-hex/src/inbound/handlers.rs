//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use converter_types::{
    ApiResponse, AppError, ConversionRepository, ConvertRequest, CurrencyListResponse,
    ErrorResponse, HistoryQuery, RateProvider,
};

use crate::ConversionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: ConversionRepository, P: RateProvider> {
    pub service: ConversionService<R, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DuplicateKey(_) => {
                (StatusCode::BAD_REQUEST, "Duplicate entry found".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List the currencies the rate provider supports.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<R: ConversionRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list_currencies().await?;
    tracing::debug!(count = currencies.len(), "Currencies fetched");
    Ok(Json(CurrencyListResponse::ok(currencies)))
}

/// Convert an amount and record it.
#[tracing::instrument(skip(state, payload))]
pub async fn convert<R: ConversionRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // A body sent without a JSON content type is read as an empty object.
    let req = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => ConvertRequest::default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable convert body");
            return Err(AppError::Validation("Invalid JSON body".into()).into());
        }
    };

    let result = state.service.convert(req).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// One page of conversion history, newest first.
#[tracing::instrument(skip(state, query))]
pub async fn history<R: ConversionRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // An unreadable query string falls back to the default page.
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let page = state.service.history(query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Every recorded conversion.
#[tracing::instrument(skip(state))]
pub async fn list_conversions<R: ConversionRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let conversions = state.service.list_conversions().await?;
    Ok(Json(ApiResponse::ok(conversions)))
}

/// Generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Route not found".into()))
}
