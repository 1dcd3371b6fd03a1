//! Client example demonstrating currency tracking flows against a running server.
//!
//! Run with: cargo run -p coinwatch-app --example client_example --no-default-features --features sqlite

use coinwatch_client::CoinwatchClient;
use coinwatch_hex::{CurrencyService, inbound::HttpServer};
use coinwatch_repo::{StaticPriceSource, build_repo};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("coinwatch.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build store (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background with the static price source, so the demo
    // needs no network access.
    let service = CurrencyService::new(repo.clone(), repo, StaticPriceSource::new());
    let server = HttpServer::new(service);
    let router = server.router();

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        axum::serve(
            TcpListener::bind(&server_addr).await.unwrap(),
            router.into_make_service(),
        )
        .await
        .unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    // Create client
    let base_url = format!("http://127.0.0.1:{port}");
    let client = CoinwatchClient::new(&base_url);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full currency tracking flow
    // ─────────────────────────────────────────────────────────────────────────

    // Health check
    let healthy = client.health().await?;
    println!("✅ Server healthy: {healthy}");

    // Track currencies; symbols are normalized to uppercase
    let btc = client.add_currency("btc", "Bitcoin").await?;
    println!("✅ Tracking {} ({})", btc.symbol, btc.name);

    let eth = client.add_currency("ETH", "Ethereum").await?;
    println!("✅ Tracking {} ({})", eth.symbol, eth.name);

    // Duplicate adds conflict
    let dup = client.add_currency("BTC", "Bitcoin").await;
    assert!(dup.is_err());
    println!("✅ Duplicate rejected: {}", dup.unwrap_err());

    // Current price (seeded at add time)
    let price = client.get_price("BTC", None).await?;
    println!("   BTC price: ${:.2} at {}", price.price, price.timestamp);

    // Price at a point in time (floor semantics over stored observations)
    let price = client.get_price("eth", Some("2030-01-01")).await?;
    println!("   ETH price on 2030-01-01: ${:.2}", price.price);

    // History for a window with no stored rows backfills from the source
    let history = client
        .price_history("ETH", Some("2020-01-01"), Some("2020-06-01"), Some(5))
        .await?;
    println!("   ETH history points: {}", history.len());
    for point in &history {
        println!("     {} ${:.2}", point.timestamp, point.price);
    }

    // List everything we track
    let currencies = client.list_currencies().await?;
    println!("\n📋 Tracked currencies:");
    for currency in &currencies {
        println!("   - {} ({})", currency.symbol, currency.name);
    }

    // Stop tracking
    client.remove_currency("ETH").await?;
    let currencies = client.list_currencies().await?;
    println!("✅ After removal, {} currency tracked", currencies.len());

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
