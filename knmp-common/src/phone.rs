//! Phone number normalization
//!
//! Numbers are parsed with Kenya as the default region and rendered in
//! international format, e.g. `0712345678` becomes `+254 712 345678` and
//! `+1 4155552671` becomes `+1 415-555-2671`.

use phonenumber::{country, Mode};
use thiserror::Error;

/// Region assumed for numbers written without a country code
pub const DEFAULT_REGION: country::Id = country::Id::KE;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid phone number format: {0}")]
pub struct PhoneFormatError(pub String);

/// Format a phone number to international format
pub fn format_phone_number(raw: &str) -> Result<String, PhoneFormatError> {
    let number = phonenumber::parse(Some(DEFAULT_REGION), raw.trim())
        .map_err(|_| PhoneFormatError(raw.to_string()))?;
    Ok(number.format().mode(Mode::International).to_string())
}

/// Normalize when parseable, otherwise keep the number as entered
pub fn normalize_or_keep(raw: &str) -> String {
    format_phone_number(raw).unwrap_or_else(|_| raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_mobile_number() {
        assert_eq!(format_phone_number("0712345678").unwrap(), "+254 712 345678");
    }

    #[test]
    fn test_local_number_with_separators() {
        assert_eq!(format_phone_number("0712-345 678").unwrap(), "+254 712 345678");
        assert_eq!(format_phone_number("(0712) 345678").unwrap(), "+254 712 345678");
    }

    #[test]
    fn test_international_forms() {
        assert_eq!(format_phone_number("+254712345678").unwrap(), "+254 712 345678");
        assert_eq!(format_phone_number("+254 712 345 678").unwrap(), "+254 712 345678");
    }

    #[test]
    fn test_foreign_numbers_use_their_own_format() {
        assert_eq!(format_phone_number("+1 415 555 2671").unwrap(), "+1 415-555-2671");
        assert_eq!(format_phone_number("+44 20 7946 0958").unwrap(), "+44 20 7946 0958");
    }

    #[test]
    fn test_unparseable_numbers() {
        assert!(format_phone_number("call me").is_err());
        assert!(format_phone_number("").is_err());
    }

    #[test]
    fn test_normalize_or_keep() {
        assert_eq!(normalize_or_keep("0712345678"), "+254 712 345678");
        assert_eq!(normalize_or_keep(" ask at the shop "), "ask at the shop");
    }
}
