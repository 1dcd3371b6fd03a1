//! Error types for the currency price service.

use crate::ports::ProviderError;

/// Domain-level errors (validation failures).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency symbol: symbol cannot be empty")]
    InvalidSymbol,

    #[error("Invalid currency name: name cannot be empty")]
    InvalidName,

    #[error("Invalid price: price must be greater than zero")]
    InvalidPrice,
}

/// Store-level errors (data access failures).
///
/// Absence is not an error at this layer: reads return `Option` and
/// update/delete report rows-affected, so the only failure modes are a
/// uniqueness conflict on create and the connection itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors: the taxonomy surfaced to transports.
///
/// Maps cleanly to HTTP status codes (404, 409, 400, 500, 503).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("External price source unavailable: {0}")]
    ExternalUnavailable(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(msg) => AppError::AlreadyExists(msg),
            StoreError::Database(msg) => AppError::Connection(msg),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnsupportedSymbol(symbol) => {
                AppError::NotFound(format!("Currency not supported: {symbol}"))
            }
            ProviderError::Unavailable(msg) => AppError::ExternalUnavailable(msg),
        }
    }
}
