//! # Coinwatch Hex
//!
//! Application service layer and HTTP adapter for the currency price service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated API documentation
//!
//! The service is generic over its two store ports and the external price
//! source, allowing different store and provider implementations to be
//! injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::CurrencyService;
