//! Coinwatch CLI
//!
//! Command-line interface for the Coinwatch API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use coinwatch_client::CoinwatchClient;

#[derive(Parser)]
#[command(name = "coinwatch")]
#[command(author, version, about = "Coinwatch API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Coinwatch API
    #[arg(
        long,
        env = "COINWATCH_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Currency tracking operations
    Currency {
        #[command(subcommand)]
        action: CurrencyCommands,
    },
    /// Price lookup operations
    Price {
        #[command(subcommand)]
        action: PriceCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// Start tracking a currency
    Add {
        /// Ticker symbol (any case; stored uppercase)
        symbol: String,
        /// Human-readable name
        #[arg(long)]
        name: String,
    },
    /// Stop tracking a currency
    Remove {
        /// Ticker symbol (uppercase)
        symbol: String,
    },
    /// List all tracked currencies
    List,
}

#[derive(Subcommand)]
enum PriceCommands {
    /// Get the price of a tracked currency
    Get {
        /// Ticker symbol
        symbol: String,
        /// Point in time (RFC 3339 or YYYY-MM-DD); defaults to latest
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Get the price history of a tracked currency
    History {
        /// Ticker symbol (uppercase)
        symbol: String,
        /// Window start (RFC 3339 or YYYY-MM-DD); defaults to 30 days ago
        #[arg(long)]
        start: Option<String>,
        /// Window end (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        end: Option<String>,
        /// Maximum number of points; defaults to 100
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = CoinwatchClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Currency { action } => match action {
            CurrencyCommands::Add { symbol, name } => {
                let currency = client.add_currency(&symbol, &name).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::Remove { symbol } => {
                client.remove_currency(&symbol).await?;
                println!("✓ Currency {} removed", symbol);
            }
            CurrencyCommands::List => {
                let currencies = client.list_currencies().await?;
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            }
        },

        Commands::Price { action } => match action {
            PriceCommands::Get { symbol, timestamp } => {
                let price = client.get_price(&symbol, timestamp.as_deref()).await?;
                println!("{}", serde_json::to_string_pretty(&price)?);
            }
            PriceCommands::History {
                symbol,
                start,
                end,
                limit,
            } => {
                let history = client
                    .price_history(&symbol, start.as_deref(), end.as_deref(), limit)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&history)?);
            }
        },
    }

    Ok(())
}
