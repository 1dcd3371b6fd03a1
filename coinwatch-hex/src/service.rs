//! Currency Application Service
//!
//! Orchestrates tracking and price lookups through the store and price source
//! ports. Contains NO infrastructure logic - pure business orchestration.

use chrono::{DateTime, Duration, Utc};

use coinwatch_types::{
    AppError, Currency, CurrencyPrice, CurrencyStore, PriceSource, PriceStore, Symbol,
};

/// Lookback window for history queries that carry no explicit bounds.
const DEFAULT_HISTORY_WINDOW_DAYS: i64 = 30;

/// Application service for currency tracking and price queries.
///
/// Generic over the store and source ports - adapters are injected at compile
/// time. This enables:
/// - Swapping stores without code changes
/// - Testing with in-memory implementations
/// - Compile-time checks for port implementation
pub struct CurrencyService<C: CurrencyStore, P: PriceStore, X: PriceSource> {
    currencies: C,
    prices: P,
    source: X,
}

impl<C: CurrencyStore, P: PriceStore, X: PriceSource> CurrencyService<C, P, X> {
    /// Creates a new currency service with the given store and source
    /// adapters.
    pub fn new(currencies: C, prices: P, source: X) -> Self {
        Self {
            currencies,
            prices,
            source,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Tracking Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Starts tracking a currency.
    ///
    /// The symbol is normalized to uppercase before the duplicate check, so
    /// `btc` and `BTC` refer to the same tracked currency. On success a first
    /// price observation is seeded from the price source; seeding failures are
    /// logged and never fail the call.
    pub async fn add_currency(&self, symbol: Symbol, name: String) -> Result<Currency, AppError> {
        let symbol = symbol.to_uppercase();

        if self.currencies.get_by_symbol(&symbol).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Currency {symbol} already exists"
            )));
        }

        let currency = Currency::new(symbol.clone(), name)?;
        self.currencies.create(&currency).await?;

        // Best-effort seed so the first price query can be served locally.
        match self.source.current_price(&symbol).await {
            Ok(price) => {
                if let Err(err) = self.prices.save_price(&price).await {
                    tracing::warn!(symbol = %symbol, error = %err, "failed to store seed price");
                }
            }
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "failed to fetch seed price");
            }
        }

        Ok(currency)
    }

    /// Stops tracking a currency.
    ///
    /// The symbol is matched exactly as stored; no normalization is applied.
    pub async fn remove_currency(&self, symbol: Symbol) -> Result<(), AppError> {
        if self.currencies.get_by_symbol(&symbol).await?.is_none() {
            return Err(AppError::NotFound(format!("Currency {symbol} not found")));
        }

        if !self.currencies.delete(&symbol).await? {
            return Err(AppError::NotFound(format!("Currency {symbol} not found")));
        }

        Ok(())
    }

    /// Lists all tracked currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        self.currencies.list().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Price Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the price of a tracked currency.
    ///
    /// Without `at`, the most recent stored observation wins. With `at`, the
    /// newest observation at or before that instant wins. When the store has
    /// no answer (or fails), the price source serves the current price
    /// instead.
    pub async fn get_currency_price(
        &self,
        symbol: Symbol,
        at: Option<DateTime<Utc>>,
    ) -> Result<CurrencyPrice, AppError> {
        let symbol = symbol.to_uppercase();

        if self.currencies.get_by_symbol(&symbol).await?.is_none() {
            return Err(AppError::NotFound(format!("Currency {symbol} not found")));
        }

        let local = match at {
            Some(at) => self.prices.price_at_or_before(&symbol, at).await,
            None => self.prices.latest_price(&symbol).await,
        };

        match local {
            Ok(Some(price)) => Ok(price),
            Ok(None) => self.source.current_price(&symbol).await.map_err(Into::into),
            Err(err) => {
                tracing::warn!(symbol = %symbol, error = %err, "stored price lookup failed, asking source");
                self.source.current_price(&symbol).await.map_err(Into::into)
            }
        }
    }

    /// Returns the price history of a tracked currency, newest first.
    ///
    /// Missing bounds default to the last 30 days ending now. When the store
    /// has no rows for the window (or fails), the price source is consulted
    /// and its points are backfilled into the store best-effort; if the
    /// source cannot help either, the stored outcome stands.
    pub async fn get_price_history(
        &self,
        symbol: Symbol,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<CurrencyPrice>, AppError> {
        if self.currencies.get_by_symbol(&symbol).await?.is_none() {
            return Err(AppError::NotFound(format!("Currency {symbol} not found")));
        }

        let end = end.unwrap_or_else(Utc::now);
        let start = start.unwrap_or_else(|| end - Duration::days(DEFAULT_HISTORY_WINDOW_DAYS));

        let local = self.prices.price_history(&symbol, start, end, limit).await;

        match local {
            Ok(prices) if !prices.is_empty() => Ok(prices),
            local => match self.source.historical_prices(&symbol, start, end).await {
                Ok(mut external) if !external.is_empty() => {
                    for price in &external {
                        if let Err(err) = self.prices.save_price(price).await {
                            tracing::warn!(symbol = %symbol, error = %err, "failed to backfill price point");
                        }
                    }

                    external.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    if limit > 0 {
                        external.truncate(limit as usize);
                    }
                    Ok(external)
                }
                Ok(_) => local.map_err(Into::into),
                Err(err) => {
                    tracing::warn!(symbol = %symbol, error = %err, "external history lookup failed");
                    local.map_err(Into::into)
                }
            },
        }
    }
}
