//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to start tracking a currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCurrencyRequest {
    /// Ticker symbol; the service normalizes it to uppercase
    #[schema(example = "btc")]
    pub symbol: String,
    /// Human-readable currency name
    #[schema(example = "Bitcoin")]
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned by the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Not found: currency XYZ is not tracked")]
    pub error: String,
    /// HTTP status code, duplicated in the body
    #[schema(example = 404)]
    pub code: u16,
}
