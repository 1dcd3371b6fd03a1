//! Configuration loading from environment.

use std::env;

/// Which price source implementation to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSourceKind {
    /// CoinGecko over HTTP, degrading to the static table on failure.
    CoinGecko,
    /// The static table only; no network calls.
    Static,
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub price_source: PriceSourceKind,
    pub coingecko_base_url: Option<String>,
    pub coingecko_api_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let price_source = match env::var("PRICE_SOURCE") {
            Ok(value) => match value.to_lowercase().as_str() {
                "coingecko" => PriceSourceKind::CoinGecko,
                "static" => PriceSourceKind::Static,
                other => {
                    return Err(anyhow::anyhow!(
                        "PRICE_SOURCE must be 'coingecko' or 'static', got '{other}'"
                    ));
                }
            },
            Err(_) => PriceSourceKind::CoinGecko,
        };

        let coingecko_base_url = env::var("COINGECKO_BASE_URL").ok();
        let coingecko_api_key = env::var("COINGECKO_API_KEY").ok();

        Ok(Self {
            port,
            database_url,
            price_source,
            coingecko_base_url,
            coingecko_api_key,
        })
    }
}
