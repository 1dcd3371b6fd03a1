//! Store port traits.
//!
//! Two independent stores back the service: one for currency records and one
//! for price observations. They are correlated by symbol string only; a
//! single database adapter typically implements both.

use chrono::{DateTime, Utc};

use crate::domain::{Currency, CurrencyPrice, Symbol};
use crate::error::StoreError;

/// Port for persisting currency records, keyed by symbol.
///
/// Lookups are case-sensitive on the stored (uppercased) symbol.
#[async_trait::async_trait]
pub trait CurrencyStore: Send + Sync + 'static {
    /// Persists a new currency.
    ///
    /// The unique index on symbol is the backstop for concurrent creates: a
    /// duplicate surfaces as [`StoreError::AlreadyExists`].
    async fn create(&self, currency: &Currency) -> Result<(), StoreError>;

    /// Gets a currency by symbol.
    async fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Currency>, StoreError>;

    /// Lists all tracked currencies.
    async fn list(&self) -> Result<Vec<Currency>, StoreError>;

    /// Updates a currency's name, refreshing `updated_at`.
    ///
    /// Returns `false` when no row matched the symbol.
    async fn update(&self, currency: &Currency) -> Result<bool, StoreError>;

    /// Deletes a currency by symbol.
    ///
    /// Returns `false` when no row matched the symbol (hard delete; price
    /// rows for the symbol are left in place).
    async fn delete(&self, symbol: &Symbol) -> Result<bool, StoreError>;
}

/// Port for persisting and querying price observations.
#[async_trait::async_trait]
pub trait PriceStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists one price observation. Observations are append-only.
    async fn save_price(&self, price: &CurrencyPrice) -> Result<(), StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Most recent observation for the symbol, by timestamp.
    async fn latest_price(&self, symbol: &Symbol) -> Result<Option<CurrencyPrice>, StoreError>;

    /// Latest observation with `timestamp <= at` (floor semantics).
    ///
    /// Never returns an observation from after `at`; a nearest-match from the
    /// future would silently rewrite history.
    async fn price_at_or_before(
        &self,
        symbol: &Symbol,
        at: DateTime<Utc>,
    ) -> Result<Option<CurrencyPrice>, StoreError>;

    /// Observations with `start <= timestamp <= end`, ordered by timestamp
    /// descending.
    ///
    /// A `limit <= 0` means no explicit cap; callers that need a bounded
    /// result pass a positive limit.
    async fn price_history(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<CurrencyPrice>, StoreError>;
}
