//! Query-string timestamp parsing.

use chrono::{DateTime, NaiveDate, Utc};

use coinwatch_types::AppError;

/// Parses an instant from a query parameter.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight UTC on that day.
pub fn parse_instant(param: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(AppError::InvalidArgument(format!(
        "invalid {param} '{value}': use RFC 3339 (2024-01-15T10:30:00Z) or a date (2024-01-15)"
    )))
}
