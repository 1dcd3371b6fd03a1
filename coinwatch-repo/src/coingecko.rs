//! CoinGecko price source adapter.
//!
//! Network implementation of the `PriceSource` port. Every failure path
//! (unknown symbol, transport error, rate limiting, non-2xx status,
//! undecodable body) degrades to the static fallback table instead of
//! surfacing an error, so a provider outage never becomes a user-visible
//! failure.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use coinwatch_types::{CurrencyPrice, PriceSource, ProviderError, Symbol};

/// Public CoinGecko v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// HTTP request timeout for provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard cap on decoded history points per request.
const MAX_HISTORY_POINTS: usize = 50;

/// Symbols served live from the provider, mapped to CoinGecko coin ids.
/// Anything else is answered from the fallback table.
const COIN_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("ADA", "cardano"),
    ("SOL", "solana"),
    ("DOT", "polkadot"),
    ("LINK", "chainlink"),
    ("MATIC", "matic-network"),
    ("AVAX", "avalanche-2"),
    ("UNI", "uniswap"),
    ("LTC", "litecoin"),
    ("XRP", "ripple"),
    ("DOGE", "dogecoin"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable construction-time configuration for the CoinGecko source.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// API base URL. Overridden in tests to point at a local server.
    pub base_url: String,
    /// Optional API credential, sent as `Authorization: Apikey {token}`.
    pub api_key: Option<String>,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response payloads
// ─────────────────────────────────────────────────────────────────────────────

/// One coin entry from `/simple/price`.
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: f64,
    last_updated_at: Option<i64>,
}

/// Body of `/coins/{id}/market_chart/range`. Each point is `[unix_ms, price]`.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<Vec<f64>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Source
// ─────────────────────────────────────────────────────────────────────────────

/// CoinGecko-backed price source.
pub struct CoinGeckoSource {
    client: reqwest::Client,
    config: CoinGeckoConfig,
    coin_ids: HashMap<&'static str, &'static str>,
}

impl CoinGeckoSource {
    /// Creates a source from its immutable configuration.
    pub fn new(config: CoinGeckoConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("coinwatch/1.0")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config,
            coin_ids: COIN_IDS.iter().copied().collect(),
        }
    }

    fn coin_id(&self, symbol: &Symbol) -> Option<&'static str> {
        let upper = symbol.to_uppercase();
        self.coin_ids.get(upper.as_str()).copied()
    }

    fn fallback_current(&self, symbol: &Symbol) -> CurrencyPrice {
        let upper = symbol.to_uppercase();
        let price = fallback_prices::fallback_price(upper.as_str());
        CurrencyPrice::new(upper, price, Utc::now())
    }

    fn fallback_history(&self, symbol: &Symbol) -> Vec<CurrencyPrice> {
        let upper = symbol.to_uppercase();
        fallback_prices::fallback_series(upper.as_str(), Utc::now())
            .into_iter()
            .map(|(timestamp, price)| CurrencyPrice::new(upper.clone(), price, timestamp))
            .collect()
    }

    /// Issues a GET and screens the status. Failures come back as strings so
    /// callers can log them and fall back.
    async fn send(&self, url: &str) -> Result<reqwest::Response, String> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(key) = &self.config.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Apikey {key}"));
        }

        let response = request.send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err("rate limited by provider".to_string());
        }
        if !status.is_success() {
            return Err(format!("provider returned status {status}"));
        }

        Ok(response)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    async fn current_price(&self, symbol: &Symbol) -> Result<CurrencyPrice, ProviderError> {
        let Some(coin_id) = self.coin_id(symbol) else {
            tracing::debug!(symbol = %symbol, "no provider id for symbol, using fallback price");
            return Ok(self.fallback_current(symbol));
        };

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_last_updated_at=true",
            self.config.base_url, coin_id
        );

        let response = match self.send(&url).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "price request failed, using fallback price");
                return Ok(self.fallback_current(symbol));
            }
        };

        let body = match response.json::<HashMap<String, SimplePrice>>().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "undecodable price response, using fallback price");
                return Ok(self.fallback_current(symbol));
            }
        };

        match body.get(coin_id) {
            Some(quote) => {
                let timestamp = quote
                    .last_updated_at
                    .filter(|secs| *secs > 0)
                    .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
                    .unwrap_or_else(Utc::now);

                Ok(CurrencyPrice::new(
                    symbol.to_uppercase(),
                    quote.usd,
                    timestamp,
                ))
            }
            None => {
                tracing::warn!(symbol = %symbol, "provider response missing coin data, using fallback price");
                Ok(self.fallback_current(symbol))
            }
        }
    }

    async fn historical_prices(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CurrencyPrice>, ProviderError> {
        let Some(coin_id) = self.coin_id(symbol) else {
            tracing::debug!(symbol = %symbol, "no provider id for symbol, using fallback series");
            return Ok(self.fallback_history(symbol));
        };

        let url = format!(
            "{}/coins/{}/market_chart/range?vs_currency=usd&from={}&to={}",
            self.config.base_url,
            coin_id,
            start.timestamp(),
            end.timestamp()
        );

        let response = match self.send(&url).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "history request failed, using fallback series");
                return Ok(self.fallback_history(symbol));
            }
        };

        match response.json::<MarketChart>().await {
            Ok(chart) => {
                let upper = symbol.to_uppercase();
                let prices = chart
                    .prices
                    .iter()
                    .take(MAX_HISTORY_POINTS)
                    .filter_map(|point| {
                        let (ms, price) = match point.as_slice() {
                            [ms, price, ..] => (*ms, *price),
                            _ => return None,
                        };
                        let timestamp = Utc.timestamp_opt(ms as i64 / 1000, 0).single()?;
                        Some(CurrencyPrice::new(upper.clone(), price, timestamp))
                    })
                    .collect();

                Ok(prices)
            }
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "undecodable history response, using fallback series");
                Ok(self.fallback_history(symbol))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> CoinGeckoSource {
        CoinGeckoSource::new(CoinGeckoConfig {
            base_url: server.uri(),
            api_key: None,
        })
    }

    #[tokio::test]
    async fn test_current_price_from_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": {"usd": 65000.5, "last_updated_at": 1_700_000_000}
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("btc")).await.unwrap();

        assert_eq!(price.symbol.as_str(), "BTC");
        assert_eq!(price.price, 65000.5);
        assert_eq!(price.timestamp.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_api_key_sent_as_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(header("Authorization", "Apikey secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": {"usd": 64000.0, "last_updated_at": 1_700_000_000}
            })))
            .mount(&server)
            .await;

        let source = CoinGeckoSource::new(CoinGeckoConfig {
            base_url: server.uri(),
            api_key: Some("secret-token".to_string()),
        });
        let price = source.current_price(&Symbol::new("BTC")).await.unwrap();

        assert_eq!(price.price, 64000.0);
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("BTC")).await.unwrap();

        assert_eq!(price.symbol.as_str(), "BTC");
        assert_eq!(price.price, 117416.0);
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("ETH")).await.unwrap();

        assert_eq!(price.price, 3200.0);
    }

    #[tokio::test]
    async fn test_undecodable_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("ADA")).await.unwrap();

        assert_eq!(price.price, 0.45);
    }

    #[tokio::test]
    async fn test_missing_coin_data_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("SOL")).await.unwrap();

        assert_eq!(price.price, 140.0);
    }

    #[tokio::test]
    async fn test_unknown_symbol_skips_network() {
        let server = MockServer::start().await;

        let source = source_for(&server);
        let price = source.current_price(&Symbol::new("XYZ")).await.unwrap();

        assert_eq!(price.price, fallback_prices::DEFAULT_FALLBACK_PRICE);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_last_updated_at_uses_now() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": {"usd": 65000.0}
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let before = Utc::now();
        let price = source.current_price(&Symbol::new("BTC")).await.unwrap();

        assert!(price.timestamp >= before);
    }

    #[tokio::test]
    async fn test_history_from_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart/range"))
            .and(query_param("vs_currency", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [
                    [1_700_000_000_000i64, 64000.0],
                    [1_700_086_400_000i64, 64500.0],
                    [1_700_172_800_000i64, 65000.0]
                ]
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let start = Utc.timestamp_opt(1_699_900_000, 0).single().unwrap();
        let end = Utc.timestamp_opt(1_700_200_000, 0).single().unwrap();
        let prices = source
            .historical_prices(&Symbol::new("BTC"), start, end)
            .await
            .unwrap();

        assert_eq!(prices.len(), 3);
        assert_eq!(prices[0].price, 64000.0);
        assert_eq!(prices[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(prices[2].timestamp.timestamp(), 1_700_172_800);
    }

    #[tokio::test]
    async fn test_history_caps_decoded_points() {
        let points: Vec<Vec<f64>> = (0..80)
            .map(|i| vec![1_700_000_000_000.0 + i as f64 * 60_000.0, 100.0 + i as f64])
            .collect();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/ethereum/market_chart/range"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": points})))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let start = Utc.timestamp_opt(1_699_900_000, 0).single().unwrap();
        let end = Utc.timestamp_opt(1_700_200_000, 0).single().unwrap();
        let prices = source
            .historical_prices(&Symbol::new("ETH"), start, end)
            .await
            .unwrap();

        assert_eq!(prices.len(), MAX_HISTORY_POINTS);
    }

    #[tokio::test]
    async fn test_history_failure_synthesizes_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/ethereum/market_chart/range"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let start = Utc.timestamp_opt(1_699_900_000, 0).single().unwrap();
        let end = Utc.timestamp_opt(1_700_200_000, 0).single().unwrap();
        let prices = source
            .historical_prices(&Symbol::new("eth"), start, end)
            .await
            .unwrap();

        assert_eq!(prices.len(), fallback_prices::HISTORY_POINTS);
        for price in &prices {
            assert_eq!(price.symbol.as_str(), "ETH");
            assert!(price.price >= 3200.0 * 0.98);
            assert!(price.price <= 3200.0 * 1.02);
        }
        // Synthetic timestamps descend one day at a time.
        for pair in prices.windows(2) {
            assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_history_empty_body_stays_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart/range"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": []})))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let start = Utc.timestamp_opt(1_699_900_000, 0).single().unwrap();
        let end = Utc.timestamp_opt(1_700_200_000, 0).single().unwrap();
        let prices = source
            .historical_prices(&Symbol::new("BTC"), start, end)
            .await
            .unwrap();

        assert!(prices.is_empty());
    }
}
