//! # Coinwatch Types
//!
//! Domain types and port traits for the currency price-tracking service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Symbol, Currency, CurrencyPrice)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, CurrencyPrice, Symbol};
pub use dto::*;
pub use error::{AppError, DomainError, StoreError};
pub use ports::{CurrencyStore, PriceSource, PriceStore, ProviderError};
