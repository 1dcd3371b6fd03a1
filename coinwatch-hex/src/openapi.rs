//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;

use coinwatch_types::domain::{Currency, CurrencyPrice, Symbol};
use coinwatch_types::dto::{AddCurrencyRequest, ErrorResponse};

use crate::inbound::handlers::{HistoryQuery, PriceQuery};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = inline(serde_json::Value), example = json!({"status": "ok"}))
    )
)]
async fn health() {}

/// Start tracking a currency
#[utoipa::path(
    post,
    path = "/api/currencies",
    tag = "currencies",
    request_body = AddCurrencyRequest,
    responses(
        (status = 201, description = "Currency tracked; symbol normalized to uppercase", body = Currency),
        (status = 400, description = "Empty symbol or name", body = ErrorResponse),
        (status = 409, description = "Currency already tracked", body = ErrorResponse)
    )
)]
async fn add_currency() {}

/// List all tracked currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Tracked currencies ordered by symbol", body = Vec<Currency>)
    )
)]
async fn list_currencies() {}

/// Stop tracking a currency
#[utoipa::path(
    delete,
    path = "/api/currencies/{symbol}",
    tag = "currencies",
    params(
        ("symbol" = String, Path, description = "Uppercase ticker symbol")
    ),
    responses(
        (status = 204, description = "Currency removed"),
        (status = 404, description = "Currency not tracked", body = ErrorResponse)
    )
)]
async fn remove_currency() {}

/// Get the price of a tracked currency
#[utoipa::path(
    get,
    path = "/api/currencies/{symbol}/price",
    tag = "prices",
    params(
        ("symbol" = String, Path, description = "Ticker symbol, any case"),
        PriceQuery
    ),
    responses(
        (status = 200, description = "Stored observation, or a live quote when none is stored", body = CurrencyPrice),
        (status = 400, description = "Unparseable timestamp", body = ErrorResponse),
        (status = 404, description = "Currency not tracked", body = ErrorResponse),
        (status = 503, description = "No stored price and the external source is unavailable", body = ErrorResponse)
    )
)]
async fn get_price() {}

/// Get the price history of a tracked currency
#[utoipa::path(
    get,
    path = "/api/currencies/{symbol}/history",
    tag = "prices",
    params(
        ("symbol" = String, Path, description = "Uppercase ticker symbol"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Price observations, newest first", body = Vec<CurrencyPrice>),
        (status = 400, description = "Unparseable start or end", body = ErrorResponse),
        (status = 404, description = "Currency not tracked", body = ErrorResponse)
    )
)]
async fn get_history() {}

/// OpenAPI documentation for the Coinwatch API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coinwatch Currency Price API",
        version = "1.0.0",
        description = "Tracks currencies and their USD prices. Prices are served from local storage first; misses fall back to CoinGecko (or a static table) and history misses are backfilled.",
        license(name = "MIT"),
    ),
    paths(
        health,
        add_currency,
        list_currencies,
        remove_currency,
        get_price,
        get_history,
    ),
    components(
        schemas(
            AddCurrencyRequest,
            Currency,
            CurrencyPrice,
            Symbol,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency tracking operations"),
        (name = "prices", description = "Price lookup and history operations"),
    )
)]
pub struct ApiDoc;
