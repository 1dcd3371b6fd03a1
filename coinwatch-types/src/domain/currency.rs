//! Currency domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Ticker symbol identifying a currency (e.g. "BTC").
///
/// Stored currencies always carry the uppercased form, and store lookups are
/// case-sensitive on that stored value. Operations that accept mixed-case
/// input normalize with [`Symbol::to_uppercase`] before touching a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Wraps a symbol string as-is, preserving its case.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Returns the uppercased form used as the stored identity.
    pub fn to_uppercase(&self) -> Self {
        Self(self.0.to_uppercase())
    }

    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the symbol is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A tracked currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    /// Uppercase ticker symbol (unique identity)
    pub symbol: Symbol,
    /// Human-readable currency name
    #[schema(example = "Bitcoin")]
    pub name: String,
    /// When the currency was first tracked
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Currency {
    /// Creates a new currency with both timestamps set to now.
    ///
    /// # Validation
    /// - Symbol cannot be empty
    /// - Name cannot be empty
    pub fn new(symbol: Symbol, name: impl Into<String>) -> Result<Self, DomainError> {
        let now = Utc::now();
        let currency = Self {
            symbol,
            name: name.into(),
            created_at: now,
            updated_at: now,
        };
        currency.validate()?;
        Ok(currency)
    }

    /// Creates a currency with all fields specified (for database reconstruction).
    pub fn from_parts(
        symbol: Symbol,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol,
            name,
            created_at,
            updated_at,
        }
    }

    /// Checks the non-empty invariants on symbol and name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.symbol.is_empty() {
            return Err(DomainError::InvalidSymbol);
        }
        if self.name.is_empty() {
            return Err(DomainError::InvalidName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uppercase() {
        let symbol = Symbol::new("btc").to_uppercase();
        assert_eq!(symbol.as_str(), "BTC");
    }

    #[test]
    fn test_symbol_preserves_case() {
        let symbol = Symbol::new("dOgE");
        assert_eq!(symbol.as_str(), "dOgE");
    }

    #[test]
    fn test_currency_creation() {
        let currency = Currency::new(Symbol::new("BTC"), "Bitcoin").unwrap();
        assert_eq!(currency.symbol.as_str(), "BTC");
        assert_eq!(currency.name, "Bitcoin");
        assert_eq!(currency.created_at, currency.updated_at);
    }

    #[test]
    fn test_empty_symbol_fails() {
        let result = Currency::new(Symbol::new(""), "Bitcoin");
        assert!(matches!(result, Err(DomainError::InvalidSymbol)));
    }

    #[test]
    fn test_empty_name_fails() {
        let result = Currency::new(Symbol::new("BTC"), "");
        assert!(matches!(result, Err(DomainError::InvalidName)));
    }
}
