//! External price source port.
//!
//! This trait defines the interface for third-party price providers.
//! Implementations can be HTTP clients, pure static stubs, etc.

use chrono::{DateTime, Utc};

use crate::domain::{CurrencyPrice, Symbol};

/// Error type for external price source operations.
///
/// The shipped implementations absorb their own failures into fallback data
/// and never return these; the variants exist for implementations that opt
/// out of the fallback discipline.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Port trait for external price providers.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync + 'static {
    /// Current price for the symbol, timestamped at the provider's
    /// last-update instant or "now".
    async fn current_price(&self, symbol: &Symbol) -> Result<CurrencyPrice, ProviderError>;

    /// Price series for the symbol over `[start, end]`.
    ///
    /// No ordering is guaranteed; callers that need a specific order sort
    /// the result themselves.
    async fn historical_prices(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CurrencyPrice>, ProviderError>;
}
