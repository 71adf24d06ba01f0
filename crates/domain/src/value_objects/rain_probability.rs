//! Rain probability value object
//!
//! Probability of precipitation for one forecast slot, stored as a fraction.
//!
//! # Examples
//!
//! ```
//! use domain::RainProbability;
//!
//! let p = RainProbability::new(0.2).unwrap();
//! assert!((p.as_percent() - 20.0).abs() < 1e-9);
//! assert!(RainProbability::new(1.5).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a probability is outside [0, 1] or not a number
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid rain probability: {0} (must be between 0 and 1)")]
pub struct InvalidRainProbability(f64);

/// Probability of rain as a fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct RainProbability(f64);

impl RainProbability {
    /// No chance of rain
    pub const NONE: Self = Self(0.0);

    /// Create a validated probability
    ///
    /// # Errors
    ///
    /// Returns `InvalidRainProbability` for NaN or values outside [0, 1].
    pub fn new(value: f64) -> Result<Self, InvalidRainProbability> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidRainProbability(value))
        }
    }

    /// Create a probability, clamping into [0, 1]; NaN becomes 0
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::NONE
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The probability as a fraction
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The probability as a percentage (0-100)
    #[must_use]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for RainProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

impl<'de> Deserialize<'de> for RainProbability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_closed_unit_interval() {
        assert!(RainProbability::new(0.0).is_ok());
        assert!(RainProbability::new(0.55).is_ok());
        assert!(RainProbability::new(1.0).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_and_nan() {
        assert!(RainProbability::new(-0.01).is_err());
        assert!(RainProbability::new(1.01).is_err());
        assert!(RainProbability::new(f64::NAN).is_err());
    }

    #[test]
    fn clamped_bounds_values() {
        assert!((RainProbability::clamped(2.0).value() - 1.0).abs() < f64::EPSILON);
        assert!(RainProbability::clamped(-1.0).value().abs() < f64::EPSILON);
        assert!(RainProbability::clamped(f64::NAN).value().abs() < f64::EPSILON);
    }

    #[test]
    fn default_is_no_rain() {
        assert_eq!(RainProbability::default(), RainProbability::NONE);
    }

    #[test]
    fn deserialization_validates() {
        let p: RainProbability = serde_json::from_str("0.3").unwrap();
        assert!((p.value() - 0.3).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<RainProbability>("3").is_err());
    }
}
