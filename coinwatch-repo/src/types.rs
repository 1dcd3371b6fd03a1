//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use coinwatch_types::{Currency, CurrencyPrice, StoreError, Symbol};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from database.
///
/// SQLite stores timestamps as RFC 3339 text; PostgreSQL uses native
/// TIMESTAMPTZ columns.
#[derive(FromRow)]
pub struct DbCurrency {
    pub symbol: String,
    pub name: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

/// Price observation row from database.
#[derive(FromRow)]
pub struct DbPrice {
    pub symbol: String,
    pub price: f64,

    #[cfg(not(feature = "sqlite"))]
    pub timestamp: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub timestamp: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
fn parse_timestamp(text: &str) -> Result<chrono::DateTime<chrono::Utc>, StoreError> {
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| StoreError::Database(format!("Invalid stored timestamp: {e}")))
}

/// Maps an insert failure, keeping unique-index conflicts distinct so callers
/// can report "already tracked" instead of a generic database error.
pub(crate) fn map_insert_err(e: sqlx::Error) -> StoreError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::AlreadyExists("currency symbol already tracked".to_string())
    } else {
        StoreError::Database(e.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbCurrency {
    /// Convert database row to domain Currency.
    pub fn into_domain(self) -> Result<Currency, StoreError> {
        #[cfg(not(feature = "sqlite"))]
        let (created_at, updated_at) = (self.created_at, self.updated_at);

        #[cfg(feature = "sqlite")]
        let (created_at, updated_at) = (
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        );

        Ok(Currency::from_parts(
            Symbol::new(self.symbol),
            self.name,
            created_at,
            updated_at,
        ))
    }
}

impl DbPrice {
    /// Convert database row to domain CurrencyPrice.
    pub fn into_domain(self) -> Result<CurrencyPrice, StoreError> {
        #[cfg(not(feature = "sqlite"))]
        let timestamp = self.timestamp;

        #[cfg(feature = "sqlite")]
        let timestamp = parse_timestamp(&self.timestamp)?;

        Ok(CurrencyPrice::new(
            Symbol::new(self.symbol),
            self.price,
            timestamp,
        ))
    }
}
