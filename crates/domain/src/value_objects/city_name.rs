//! City name value object
//!
//! The only user-supplied text that reaches the weather provider and the
//! generated prompt, so it is trimmed and restricted to characters that
//! appear in place names.
//!
//! # Examples
//!
//! ```
//! use domain::CityName;
//!
//! let city = CityName::new("  Navi Mumbai ").unwrap();
//! assert_eq!(city.as_str(), "Navi Mumbai");
//!
//! assert!(CityName::new("").is_err());
//! assert!(CityName::new("Pune&appid=x").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated city name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    /// Maximum accepted length in characters
    pub const MAX_LEN: usize = 85;

    /// Create a new city name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCity` if the name is empty after trimming,
    /// longer than [`Self::MAX_LEN`], or contains characters other than
    /// letters, spaces, hyphens, periods and apostrophes.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidCity("city name is empty".to_string()));
        }

        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(DomainError::InvalidCity(format!(
                "city name exceeds {} characters",
                Self::MAX_LEN
            )));
        }

        if let Some(bad) = trimmed.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(DomainError::InvalidCity(format!(
                "unexpected character '{bad}' in city name"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_allowed(c: char) -> bool {
        // Indic blocks carry viramas and other signs that are not `Alphabetic`.
        c.is_alphabetic()
            || ('\u{0900}'..='\u{0DFF}').contains(&c)
            || matches!(c, ' ' | '-' | '.' | '\'')
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CityName> for String {
    fn from(city: CityName) -> Self {
        city.0
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
