//! # Coinwatch Client SDK
//!
//! A typed Rust client for the Coinwatch API.

use coinwatch_types::{AddCurrencyRequest, Currency, CurrencyPrice};
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

/// Coinwatch API client.
pub struct CoinwatchClient {
    base_url: String,
    http: Client,
}

impl CoinwatchClient {
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

    /// Starts tracking a currency. The server uppercases the symbol.
    pub async fn add_currency(&self, symbol: &str, name: &str) -> Result<Currency, ClientError> {
        let req = AddCurrencyRequest {
            symbol: symbol.to_string(),
            name: name.to_string(),
        };
        self.post("/api/currencies", &req).await
    }

    /// Stops tracking a currency.
    pub async fn remove_currency(&self, symbol: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/currencies/{}", symbol)).await
    }

    /// Lists all tracked currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.get("/api/currencies", &[]).await
    }

    /// Gets the price of a tracked currency.
    ///
    /// `timestamp` accepts RFC 3339 or `YYYY-MM-DD`; `None` asks for the
    /// latest stored price.
    pub async fn get_price(
        &self,
        symbol: &str,
        timestamp: Option<&str>,
    ) -> Result<CurrencyPrice, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(ts) = timestamp {
            query.push(("timestamp", ts.to_string()));
        }
        self.get(&format!("/api/currencies/{}/price", symbol), &query)
            .await
    }

    /// Gets the price history of a tracked currency, newest first.
    pub async fn price_history(
        &self,
        symbol: &str,
        start: Option<&str>,
        end: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<CurrencyPrice>, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start {
            query.push(("start", start.to_string()));
        }
        if let Some(end) = end {
            query.push(("end", end.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get(&format!("/api/currencies/{}/history", symbol), &query)
            .await
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

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.api_error(status, resp).await)
        }
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
            Err(self.api_error(status, resp).await)
        }
    }

    async fn api_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CoinwatchClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = CoinwatchClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
