//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use coinwatch_types::{
    AddCurrencyRequest, AppError, CurrencyStore, PriceSource, PriceStore, Symbol,
};

use crate::CurrencyService;

use super::timeparse::parse_instant;

/// Cap applied when a history request carries no usable `limit`.
pub const DEFAULT_HISTORY_LIMIT: i64 = 100;

/// Application state shared across handlers.
pub struct AppState<C: CurrencyStore, P: PriceStore, X: PriceSource> {
    pub service: CurrencyService<C, P, X>,
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
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Connection(msg) => {
                // Store details stay in the logs, not in the response body.
                tracing::error!(error = %msg, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::ExternalUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Query parameters for the price endpoint.
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct PriceQuery {
    /// Point in time to price at; RFC 3339 or `YYYY-MM-DD`. Defaults to the
    /// latest stored observation.
    pub timestamp: Option<String>,
}

/// Query parameters for the history endpoint.
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct HistoryQuery {
    /// Window start; RFC 3339 or `YYYY-MM-DD`. Defaults to 30 days before end.
    pub start: Option<String>,
    /// Window end; RFC 3339 or `YYYY-MM-DD`. Defaults to now.
    pub end: Option<String>,
    /// Maximum number of points to return. Defaults to 100.
    pub limit: Option<i64>,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Start tracking a currency.
#[tracing::instrument(skip(state, req), fields(symbol = %req.symbol))]
pub async fn add_currency<C: CurrencyStore, P: PriceStore, X: PriceSource>(
    State(state): State<Arc<AppState<C, P, X>>>,
    Json(req): Json<AddCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state
        .service
        .add_currency(Symbol::new(req.symbol), req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(currency)))
}

/// List all tracked currencies.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<C: CurrencyStore, P: PriceStore, X: PriceSource>(
    State(state): State<Arc<AppState<C, P, X>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list_currencies().await?;
    Ok(Json(currencies))
}

/// Stop tracking a currency.
#[tracing::instrument(skip(state), fields(symbol = %symbol))]
pub async fn remove_currency<C: CurrencyStore, P: PriceStore, X: PriceSource>(
    State(state): State<Arc<AppState<C, P, X>>>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.remove_currency(Symbol::new(symbol)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the price of a tracked currency, now or at a point in time.
#[tracing::instrument(skip(state, query), fields(symbol = %symbol))]
pub async fn get_price<C: CurrencyStore, P: PriceStore, X: PriceSource>(
    State(state): State<Arc<AppState<C, P, X>>>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let at = query
        .timestamp
        .as_deref()
        .map(|value| parse_instant("timestamp", value))
        .transpose()?;

    let price = state
        .service
        .get_currency_price(Symbol::new(symbol), at)
        .await?;
    Ok(Json(price))
}

/// Get the stored price history of a tracked currency.
#[tracing::instrument(skip(state, query), fields(symbol = %symbol))]
pub async fn get_history<C: CurrencyStore, P: PriceStore, X: PriceSource>(
    State(state): State<Arc<AppState<C, P, X>>>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start = query
        .start
        .as_deref()
        .map(|value| parse_instant("start", value))
        .transpose()?;
    let end = query
        .end
        .as_deref()
        .map(|value| parse_instant("end", value))
        .transpose()?;
    let limit = match query.limit {
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_HISTORY_LIMIT,
    };

    let history = state
        .service
        .get_price_history(Symbol::new(symbol), start, end, limit)
        .await?;
    Ok(Json(history))
}
