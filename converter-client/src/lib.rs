//! # Converter Client SDK
//!
//! A typed Rust client for the Currency Converter API.

use converter_types::{
    ApiResponse, ConversionRecord, ConversionResult, ConvertRequest, CurrencyCode,
    CurrencyListResponse, HistoryPage,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists the supported currencies.
    pub async fn list_currencies(&self) -> Result<Vec<CurrencyCode>, ClientError> {
        let resp: CurrencyListResponse = self.get("/currencies", &[]).await?;
        Ok(resp.currencies)
    }

    /// Converts an amount and returns the server's result.
    pub async fn convert(
        &self,
        source: &str,
        target: &str,
        amount: f64,
    ) -> Result<ConversionResult, ClientError> {
        let req = ConvertRequest::new(source, target, amount);
        let resp: ApiResponse<ConversionResult> = self.post("/convert", &req).await?;
        Ok(resp.data)
    }

    /// Fetches one page of history. `None` leaves the server default.
    pub async fn history(
        &self,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> Result<HistoryPage, ClientError> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let resp: ApiResponse<HistoryPage> = self.get("/history", &query).await?;
        Ok(resp.data)
    }

    /// Lists every recorded conversion.
    pub async fn conversions(&self) -> Result<Vec<ConversionRecord>, ClientError> {
        let resp: ApiResponse<Vec<ConversionRecord>> = self.get("/conversions", &[]).await?;
        Ok(resp.data)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = ConverterClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ConverterClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_convert_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/convert"))
            .and(body_json(json!({
                "sourceCurrency": "USD",
                "targetCurrency": "EUR",
                "amount": 100.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "sourceCurrency": "USD",
                    "targetCurrency": "EUR",
                    "amount": 100.0,
                    "convertedAmount": 92.15,
                    "exchangeRate": 0.9215,
                    "timestamp": "2024-05-01T12:00:00Z"
                }
            })))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let result = client.convert("USD", "EUR", 100.0).await.unwrap();

        assert_eq!(result.converted_amount, 92.15);
        assert_eq!(result.exchange_rate, 0.9215);
    }

    #[tokio::test]
    async fn test_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "message": "Amount must be a positive number"
            })))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let err = client.convert("USD", "EUR", -1.0).await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Amount must be a positive number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_history_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .and(query_param("limit", "5"))
            .and(query_param("offset", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "conversions": [],
                    "pagination": { "total": 12, "limit": 5, "offset": 10, "hasMore": false }
                }
            })))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let page = client.history(Some(5), Some(10)).await.unwrap();

        assert!(page.conversions.is_empty());
        assert_eq!(page.pagination.total, 12);
        assert!(!page.pagination.has_more);
    }

    #[tokio::test]
    async fn test_list_currencies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "currencies": [{ "code": "EUR", "name": "Euro" }]
            })))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let currencies = client.list_currencies().await.unwrap();

        assert_eq!(currencies, vec![CurrencyCode::new("EUR", "Euro")]);
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = ConverterClient::new(server.uri());
        let err = client.conversions().await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}
