//! Humidity value object
//!
//! Relative humidity percentage as reported for a single forecast slot.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Humidity;
//!
//! let h = Humidity::new(75).expect("valid humidity");
//! assert_eq!(h.value(), 75);
//! assert_eq!(h.to_string(), "75%");
//!
//! assert!(Humidity::new(101).is_err());
//! assert_eq!(Humidity::clamped(150).value(), 100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a humidity value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid humidity: {0}% is out of range (must be 0-100)")]
pub struct InvalidHumidity(u8);

/// Relative humidity percentage (0-100%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Humidity(u8);

impl Humidity {
    /// Maximum valid humidity percentage
    pub const MAX: u8 = 100;

    /// Create a new validated humidity value
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` if the value is greater than 100.
    pub const fn new(value: u8) -> Result<Self, InvalidHumidity> {
        if value > Self::MAX {
            Err(InvalidHumidity(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create a humidity value from a provider reading, clamping to 0-100
    ///
    /// Providers report humidity as a JSON integer that may not fit in a `u8`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        // Lossless: the clamp bounds the value to 0..=100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value.clamp(0, i64::from(Self::MAX)) as u8)
    }

    /// Get the humidity value as a u8
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_bounds() {
        assert!(Humidity::new(0).is_ok());
        assert!(Humidity::new(100).is_ok());
    }

    #[test]
    fn new_rejects_above_hundred() {
        let result = Humidity::new(101);
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid humidity: 101% is out of range (must be 0-100)"
        );
    }

    #[test]
    fn clamped_handles_provider_noise() {
        assert_eq!(Humidity::clamped(-4).value(), 0);
        assert_eq!(Humidity::clamped(75).value(), 75);
        assert_eq!(Humidity::clamped(130).value(), 100);
        assert_eq!(Humidity::clamped(i64::MAX).value(), 100);
    }

    #[test]
    fn display_appends_percent() {
        assert_eq!(Humidity::new(65).unwrap().to_string(), "65%");
    }

    #[test]
    fn serializes_as_plain_number() {
        let h = Humidity::new(65).unwrap();
        assert_eq!(serde_json::to_string(&h).unwrap(), "65");
    }

    #[test]
    fn deserialization_validates() {
        let h: Humidity = serde_json::from_str("65").unwrap();
        assert_eq!(h.value(), 65);
        assert!(serde_json::from_str::<Humidity>("101").is_err());
    }
}
