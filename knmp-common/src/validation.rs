//! Reusable field validation rules
//!
//! The report wizard stages input verbatim; these rules are applied where a
//! value must be trusted (age at commit time, staff edits).

use thiserror::Error;

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 120;

/// A single field-level validation failure, shown to the user as-is
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Age must be within 0..=120
pub fn validate_age(age: i64) -> Result<(), ValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::new(
            "age",
            "Please enter a valid age between 0 and 120.",
        ));
    }
    Ok(())
}

/// Parse an optional age field; blank means unknown
pub fn parse_age(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let age = raw.parse::<i64>().map_err(|_| {
        ValidationError::new("age", "Please enter a valid age between 0 and 120.")
    })?;
    validate_age(age)?;
    Ok(Some(age))
}

/// Remove whitespace, `-`, `(` and `)`; any other character stays and fails the check
fn strip_phone_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Phone numbers need 10-15 digits, optionally prefixed with `+`
pub fn validate_phone_number(raw: &str) -> Result<(), ValidationError> {
    let compact = strip_phone_separators(raw);
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    let valid = (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ValidationError::new(
            "phone_number",
            "Please enter a valid phone number.",
        ));
    }
    Ok(())
}

/// Required text field must be non-blank
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "This field is required."));
    }
    Ok(())
}
