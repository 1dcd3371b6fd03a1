//! # Coinwatch Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the store adapter
//! - Select the external price source
//! - Create the currency service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coinwatch_hex::{CurrencyService, inbound::HttpServer};
use coinwatch_repo::{CoinGeckoConfig, CoinGeckoSource, Repo, StaticPriceSource, build_repo};
use coinwatch_types::PriceSource;

use config::PriceSourceKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coinwatch_app=debug,coinwatch_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting coinwatch server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build store (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    let addr = format!("0.0.0.0:{}", config.port);

    // The server is generic over the price source, so each branch
    // monomorphizes its own wiring.
    match config.price_source {
        PriceSourceKind::CoinGecko => {
            let source = CoinGeckoSource::new(CoinGeckoConfig {
                base_url: config
                    .coingecko_base_url
                    .unwrap_or_else(|| coinwatch_repo::DEFAULT_BASE_URL.to_string()),
                api_key: config.coingecko_api_key,
            });
            tracing::info!("Price source: CoinGecko");
            serve(repo, source, &addr).await
        }
        PriceSourceKind::Static => {
            tracing::info!("Price source: static table");
            serve(repo, StaticPriceSource::new(), &addr).await
        }
    }
}

async fn serve<X: PriceSource>(repo: Repo, source: X, addr: &str) -> anyhow::Result<()> {
    let service = CurrencyService::new(repo.clone(), repo, source);
    HttpServer::new(service).run(addr).await
}
