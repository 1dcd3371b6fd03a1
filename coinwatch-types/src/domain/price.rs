//! Currency price domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::Symbol;
use crate::error::DomainError;

/// A price observation for a currency at a point in time.
///
/// Prices are correlated to currencies by symbol only; there is no foreign
/// key, and a price row may outlive the deletion of its currency. Once stored,
/// a price is never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyPrice {
    /// Ticker symbol of the priced currency
    pub symbol: Symbol,
    /// Price in USD
    #[schema(example = 117416.0)]
    pub price: f64,
    /// Instant the price was observed
    pub timestamp: DateTime<Utc>,
}

impl CurrencyPrice {
    /// Creates a price observation.
    pub fn new(symbol: Symbol, price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            symbol,
            price,
            timestamp,
        }
    }

    /// Checks that the price is positive.
    ///
    /// Persistence does not enforce this invariant; callers decide whether an
    /// invalid observation is acceptable.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.price <= 0.0 {
            return Err(DomainError::InvalidPrice);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_price_creation() {
        let price = CurrencyPrice::new(Symbol::new("BTC"), 117416.0, Utc::now());
        assert_eq!(price.symbol.as_str(), "BTC");
        assert!(price.validate().is_ok());
    }

    #[test]
    fn test_zero_price_is_invalid() {
        let price = CurrencyPrice::new(Symbol::new("BTC"), 0.0, Utc::now());
        assert!(matches!(price.validate(), Err(DomainError::InvalidPrice)));
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let price = CurrencyPrice::new(Symbol::new("BTC"), -1.0, Utc::now());
        assert!(matches!(price.validate(), Err(DomainError::InvalidPrice)));
    }
}
