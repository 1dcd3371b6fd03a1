//! Static price source.
//!
//! Offline implementation of the `PriceSource` port: every answer comes from
//! the fallback table and synthetic series, no network involved. Selected via
//! the PRICE_SOURCE configuration for local development and demos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use coinwatch_types::{CurrencyPrice, PriceSource, ProviderError, Symbol};

/// Price source that serves static fallback data for every request.
#[derive(Debug, Default, Clone)]
pub struct StaticPriceSource;

impl StaticPriceSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn current_price(&self, symbol: &Symbol) -> Result<CurrencyPrice, ProviderError> {
        let upper = symbol.to_uppercase();
        let price = fallback_prices::fallback_price(upper.as_str());
        Ok(CurrencyPrice::new(upper, price, Utc::now()))
    }

    async fn historical_prices(
        &self,
        symbol: &Symbol,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<CurrencyPrice>, ProviderError> {
        let upper = symbol.to_uppercase();
        let series = fallback_prices::fallback_series(upper.as_str(), Utc::now())
            .into_iter()
            .map(|(timestamp, price)| CurrencyPrice::new(upper.clone(), price, timestamp))
            .collect();

        Ok(series)
    }
}
