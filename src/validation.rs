// src/validation.rs
//
// Form-field checks. Each check reports `Some(message)` on violation and
// never panics on malformed input; malformed input is exactly what it is
// here to report. `validate_product_fields` runs every rule (no
// short-circuit) and aggregates the messages, one per line, so the user
// sees the whole list at once.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CatalogError;

/// One or more digits, optionally a decimal separator (`.` or `,`) and one
/// or more digits. A sign is structurally rejected, so negative prices
/// cannot enter through the form; zero is accepted.
static DECIMAL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+([.,]\d+)?$").expect("valid pattern"));

/// Required field: non-blank after trimming.
pub fn require_present(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("field {field} is empty"));
    }
    None
}

/// Minimum trimmed length. Blank values are skipped; presence is a
/// separate rule.
pub fn require_min_length(field: &str, value: &str, min: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() < min {
        return Some(format!("field {field} has fewer than {min} characters"));
    }
    None
}

/// Maximum trimmed length. Blank values are skipped.
pub fn require_max_length(field: &str, value: &str, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max {
        return Some(format!("field {field} has more than {max} characters"));
    }
    None
}

/// Decimal format: `digits[(.|,)digits]` over the whole trimmed value.
pub fn require_decimal(field: &str, value: &str) -> Option<String> {
    if !DECIMAL_FORMAT.is_match(value.trim()) {
        return Some(format!("field {field} has an invalid format or is empty"));
    }
    None
}

/// Rules of the product form: codigo present and exactly 5 characters,
/// nombre present, precio present and decimal-formatted.
pub fn validate_product_fields(
    codigo: &str,
    nombre: &str,
    precio: &str,
) -> Result<(), CatalogError> {
    let errors: Vec<String> = [
        require_present("codigo", codigo),
        require_min_length("codigo", codigo, 5),
        require_max_length("codigo", codigo, 5),
        require_present("nombre", nombre),
        require_present("precio", precio),
        require_decimal("precio", precio),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation(errors.join("\n")))
    }
}
