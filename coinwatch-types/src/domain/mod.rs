//! Domain models for the currency price service.

pub mod currency;
pub mod price;

pub use currency::{Currency, Symbol};
pub use price::CurrencyPrice;
