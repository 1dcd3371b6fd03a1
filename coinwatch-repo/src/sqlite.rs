//! SQLite store adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use coinwatch_types::{Currency, CurrencyPrice, CurrencyStore, PriceStore, StoreError, Symbol};

use crate::types::{DbCurrency, DbPrice, map_insert_err};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Formats a timestamp for column values and query binds.
///
/// Fixed-width UTC text (microsecond precision, `Z` suffix) so that the
/// lexicographic comparisons in the floor and range queries match
/// chronological order.
fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CurrencyStore implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CurrencyStore for SqliteRepo {
    async fn create(&self, currency: &Currency) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO currencies (symbol, name, created_at, updated_at) VALUES (?, ?, ?, ?)"#,
        )
        .bind(currency.symbol.as_str())
        .bind(&currency.name)
        .bind(fmt_ts(currency.created_at))
        .bind(fmt_ts(currency.updated_at))
        .execute(&self.pool)
        .await
        .map_err(map_insert_err)?;

        Ok(())
    }

    async fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Currency>, StoreError> {
        let row: Option<DbCurrency> = sqlx::query_as(
            r#"SELECT symbol, name, created_at, updated_at FROM currencies WHERE symbol = ?"#,
        )
        .bind(symbol.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbCurrency::into_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<Currency>, StoreError> {
        let rows: Vec<DbCurrency> = sqlx::query_as(
            r#"SELECT symbol, name, created_at, updated_at FROM currencies ORDER BY symbol ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbCurrency::into_domain).collect()
    }

    async fn update(&self, currency: &Currency) -> Result<bool, StoreError> {
        let result =
            sqlx::query(r#"UPDATE currencies SET name = ?, updated_at = ? WHERE symbol = ?"#)
                .bind(&currency.name)
                .bind(fmt_ts(Utc::now()))
                .bind(currency.symbol.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, symbol: &Symbol) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM currencies WHERE symbol = ?"#)
            .bind(symbol.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PriceStore implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PriceStore for SqliteRepo {
    async fn save_price(&self, price: &CurrencyPrice) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO currency_prices (symbol, price, timestamp) VALUES (?, ?, ?)"#,
        )
        .bind(price.symbol.as_str())
        .bind(price.price)
        .bind(fmt_ts(price.timestamp))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn latest_price(&self, symbol: &Symbol) -> Result<Option<CurrencyPrice>, StoreError> {
        let row: Option<DbPrice> = sqlx::query_as(
            r#"SELECT symbol, price, timestamp FROM currency_prices
               WHERE symbol = ?
               ORDER BY timestamp DESC
               LIMIT 1"#,
        )
        .bind(symbol.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbPrice::into_domain).transpose()
    }

    async fn price_at_or_before(
        &self,
        symbol: &Symbol,
        at: DateTime<Utc>,
    ) -> Result<Option<CurrencyPrice>, StoreError> {
        let row: Option<DbPrice> = sqlx::query_as(
            r#"SELECT symbol, price, timestamp FROM currency_prices
               WHERE symbol = ? AND timestamp <= ?
               ORDER BY timestamp DESC
               LIMIT 1"#,
        )
        .bind(symbol.as_str())
        .bind(fmt_ts(at))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbPrice::into_domain).transpose()
    }

    async fn price_history(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<CurrencyPrice>, StoreError> {
        // SQLite treats a negative LIMIT as "no limit".
        let cap = if limit > 0 { limit } else { -1 };

        let rows: Vec<DbPrice> = sqlx::query_as(
            r#"SELECT symbol, price, timestamp FROM currency_prices
               WHERE symbol = ? AND timestamp >= ? AND timestamp <= ?
               ORDER BY timestamp DESC
               LIMIT ?"#,
        )
        .bind(symbol.as_str())
        .bind(fmt_ts(start))
        .bind(fmt_ts(end))
        .bind(cap)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbPrice::into_domain).collect()
    }
}
