// src/parse.rs
//
// Numeric form-field conversions. Decimal input is locale-tolerant: the
// form accepts both "12.50" and "12,50".

use crate::error::CatalogError;

/// Parse a decimal form field, accepting `.` or `,` as separator.
pub fn parse_decimal(s: &str) -> Result<f64, CatalogError> {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        if let Ok(value) = trimmed.replace(',', ".").parse::<f64>() {
            if value.is_finite() {
                return Ok(value);
            }
        }
    }
    Err(CatalogError::validation("invalid decimal number format"))
}

/// Render a price for the form editor: two decimals, `.` separator, no
/// thousands grouping, so the rendered value passes the decimal check on
/// resubmit.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}
