//! Validated currency code type.
//!
//! Rates can arrive from the online provider for any ISO 4217 code, so this
//! is an open newtype rather than a closed enum. Validation happens once at
//! the boundary; everything downstream can trust the shape.

use serde::{Deserialize, Serialize};

/// An ISO 4217-style currency code: exactly three ASCII uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

/// Error returned when a currency code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: '{0}'")]
pub struct InvalidCurrencyCode(pub String);

impl CurrencyCode {
    /// Parses and validates a currency code, uppercasing the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not exactly three ASCII letters.
    pub fn new(code: &str) -> Result<Self, InvalidCurrencyCode> {
        let upper = code.trim().to_ascii_uppercase();
        if upper.len() == 3 && upper.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(upper))
        } else {
            Err(InvalidCurrencyCode(code.to_string()))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("USD", "USD")]
    #[case("usd", "USD")]
    #[case(" eur ", "EUR")]
    #[case("Idr", "IDR")]
    fn test_valid_codes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(CurrencyCode::new(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("US")]
    #[case("USDX")]
    #[case("U$D")]
    #[case("123")]
    fn test_invalid_codes(#[case] input: &str) {
        assert!(CurrencyCode::new(input).is_err());
    }

    #[test]
    fn test_display_matches_str() {
        let code = CurrencyCode::new("jpy").unwrap();
        assert_eq!(code.to_string(), "JPY");
    }
}
