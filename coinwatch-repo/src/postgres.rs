//! PostgreSQL store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use coinwatch_types::{Currency, CurrencyPrice, CurrencyStore, PriceStore, StoreError, Symbol};

use crate::types::{DbCurrency, DbPrice, map_insert_err};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Store
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store implementation.
#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CurrencyStore implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CurrencyStore for PostgresRepo {
    async fn create(&self, currency: &Currency) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO currencies (symbol, name, created_at, updated_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(currency.symbol.as_str())
        .bind(&currency.name)
        .bind(currency.created_at)
        .bind(currency.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_err)?;

        Ok(())
    }

    async fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Currency>, StoreError> {
        let row: Option<DbCurrency> = sqlx::query_as(
            r#"SELECT symbol, name, created_at, updated_at FROM currencies WHERE symbol = $1"#,
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
            sqlx::query(r#"UPDATE currencies SET name = $1, updated_at = $2 WHERE symbol = $3"#)
                .bind(&currency.name)
                .bind(Utc::now())
                .bind(currency.symbol.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, symbol: &Symbol) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM currencies WHERE symbol = $1"#)
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
impl PriceStore for PostgresRepo {
    async fn save_price(&self, price: &CurrencyPrice) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO currency_prices (symbol, price, timestamp) VALUES ($1, $2, $3)"#,
        )
        .bind(price.symbol.as_str())
        .bind(price.price)
        .bind(price.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn latest_price(&self, symbol: &Symbol) -> Result<Option<CurrencyPrice>, StoreError> {
        let row: Option<DbPrice> = sqlx::query_as(
            r#"SELECT symbol, price, timestamp FROM currency_prices
               WHERE symbol = $1
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
               WHERE symbol = $1 AND timestamp <= $2
               ORDER BY timestamp DESC
               LIMIT 1"#,
        )
        .bind(symbol.as_str())
        .bind(at)
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
        // LIMIT NULL means "no limit" in PostgreSQL.
        let cap = (limit > 0).then_some(limit);

        let rows: Vec<DbPrice> = sqlx::query_as(
            r#"SELECT symbol, price, timestamp FROM currency_prices
               WHERE symbol = $1 AND timestamp >= $2 AND timestamp <= $3
               ORDER BY timestamp DESC
               LIMIT $4"#,
        )
        .bind(symbol.as_str())
        .bind(start)
        .bind(end)
        .bind(cap)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbPrice::into_domain).collect()
    }
}
